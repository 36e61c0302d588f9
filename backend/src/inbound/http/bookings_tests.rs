//! Tests for bookings HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::TimeZone;
use pagination::PageRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{BookingWindow, Error, UserId};
use crate::inbound::http::test_utils::{MockPorts, sharer, test_app};

#[fixture]
fn booker() -> UserId {
    UserId::generate()
}

fn waiting_booking(booker: UserId) -> Booking {
    let start = Utc
        .with_ymd_and_hms(2026, 4, 2, 9, 0, 0)
        .single()
        .expect("valid start");
    let window =
        BookingWindow::new(start, start + chrono::Duration::days(1)).expect("valid window");
    Booking::new(
        BookingId::generate(),
        ItemId::generate(),
        booker,
        window,
        BookingStatus::Waiting,
    )
}

#[rstest]
#[actix_web::test]
async fn create_booking_returns_waiting_booking(booker: UserId) {
    let booking = waiting_booking(booker);
    let item_id = *booking.item_id();
    let start = booking.start();
    let returned = booking.clone();
    let mut ports = MockPorts::default();
    ports
        .bookings
        .expect_create_booking()
        .withf(move |got, draft| {
            *got == booker && draft.item_id == item_id && draft.start == Some(start)
        })
        .times(1)
        .returning(move |_, _| Ok(returned.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/bookings")
        .insert_header(sharer(&booker))
        .set_json(json!({
            "itemId": item_id.to_string(),
            "start": booking.start(),
            "end": booking.end(),
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "WAITING");
    assert_eq!(body["bookerId"], booker.to_string());
    assert_eq!(body["itemId"], item_id.to_string());
}

#[rstest]
#[actix_web::test]
async fn missing_item_id_is_rejected(booker: UserId) {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/bookings")
        .insert_header(sharer(&booker))
        .set_json(json!({"start": "2026-04-02T09:00:00Z", "end": "2026-04-03T09:00:00Z"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "itemId");
}

#[rstest]
#[case("true", true)]
#[case("false", false)]
#[actix_web::test]
async fn decision_flag_is_forwarded(booker: UserId, #[case] raw: &str, #[case] approved: bool) {
    let booking = waiting_booking(booker);
    let booking_id = *booking.id();
    let owner = UserId::generate();
    let decided = booking.with_status(BookingStatus::decided(approved));
    let mut ports = MockPorts::default();
    ports
        .bookings
        .expect_decide_booking()
        .withf(move |got, id, flag| *got == owner && *id == booking_id && *flag == approved)
        .times(1)
        .returning(move |_, _, _| Ok(decided.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved={raw}"))
        .insert_header(sharer(&owner))
        .to_request();
    let body: BookingResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.status, BookingStatus::decided(approved));
}

#[rstest]
#[actix_web::test]
async fn decision_without_flag_is_rejected(booker: UserId) {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/bookings/{}", BookingId::generate()))
        .insert_header(sharer(&booker))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn booker_listing_defaults_state_and_page(booker: UserId) {
    let mut ports = MockPorts::default();
    ports
        .bookings
        .expect_list_bookings()
        .withf(move |subject, state, page| {
            *subject == BookingSubject::Booker(booker)
                && state == "ALL"
                && *page == PageRequest::default()
        })
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/bookings")
        .insert_header(sharer(&booker))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn owner_listing_is_routed_ahead_of_booking_lookup(booker: UserId) {
    let mut ports = MockPorts::default();
    ports
        .bookings
        .expect_list_bookings()
        .withf(move |subject, state, page| {
            *subject == BookingSubject::Owner(booker)
                && state == "FUTURE"
                && *page == PageRequest::try_new(7, 5).expect("page")
        })
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/bookings/owner?state=FUTURE&from=7&size=5")
        .insert_header(sharer(&booker))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn unknown_state_is_reported_with_its_code(booker: UserId) {
    let mut ports = MockPorts::default();
    ports
        .bookings
        .expect_list_bookings()
        .returning(|_, state, _| Err(Error::unknown_state(format!("Unknown state: {state}"))));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/bookings?state=BOGUS")
        .insert_header(sharer(&booker))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unknown_state");
    assert_eq!(body["message"], "Unknown state: BOGUS");
}

#[rstest]
#[actix_web::test]
async fn invisible_booking_is_not_found(booker: UserId) {
    let mut ports = MockPorts::default();
    ports
        .bookings
        .expect_get_booking()
        .returning(|_, id| Err(Error::not_found(format!("booking {id} not found"))));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/bookings/{}", BookingId::generate()))
        .insert_header(sharer(&booker))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
