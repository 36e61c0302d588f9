//! Tests for items HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::TimeZone;
use pagination::PageRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{BookingId, Comment, CommentId, Error, UserId};
use crate::inbound::http::test_utils::{MockPorts, sharer, test_app};

#[fixture]
fn owner() -> UserId {
    UserId::generate()
}

fn drill(owner: UserId) -> Item {
    Item::try_new(
        ItemId::generate(),
        owner,
        ItemDraft {
            name: "Drill".to_owned(),
            description: "Cordless drill".to_owned(),
            available: true,
            request_id: None,
        },
    )
    .expect("valid item")
}

#[rstest]
#[actix_web::test]
async fn create_item_passes_the_caller_as_owner(owner: UserId) {
    let item = drill(owner);
    let returned = item.clone();
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_create_item()
        .withf(move |got, draft| *got == owner && draft.name == "Drill" && draft.available)
        .times(1)
        .returning(move |_, _| Ok(returned.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/items")
        .insert_header(sharer(&owner))
        .set_json(json!({"name": "Drill", "description": "Cordless drill", "available": true}))
        .to_request();
    let body: ItemResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, ItemResponse::from(&item));
}

#[rstest]
#[actix_web::test]
async fn missing_availability_is_rejected_before_the_service(owner: UserId) {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/items")
        .insert_header(sharer(&owner))
        .set_json(json!({"name": "Drill", "description": "Cordless drill"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "available");
}

#[rstest]
#[actix_web::test]
async fn requests_without_identity_are_rejected() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/items")
        .set_json(json!({"name": "Drill", "description": "Cordless drill", "available": true}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn item_view_carries_booking_context_and_comments(owner: UserId) {
    let item = drill(owner);
    let item_id = *item.id();
    let booker = UserId::generate();
    let created = chrono::Utc
        .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
        .single()
        .expect("valid instant");
    let comment = Comment::try_new(CommentId::generate(), item_id, booker, "Great", created)
        .expect("valid comment");
    let last = BookingRef {
        id: BookingId::generate(),
        booker_id: booker,
    };
    let view = ItemView {
        item,
        last_booking: Some(last),
        next_booking: None,
        comments: vec![AuthoredComment {
            comment,
            author_name: "Bob".to_owned(),
        }],
    };
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_get_item()
        .withf(move |viewer, id| *viewer == owner && *id == item_id)
        .returning(move |_, _| Ok(view.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/items/{item_id}"))
        .insert_header(sharer(&owner))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["lastBooking"]["id"], last.id.to_string());
    assert_eq!(body["lastBooking"]["bookerId"], booker.to_string());
    assert!(body["nextBooking"].is_null());
    assert_eq!(body["comments"][0]["authorName"], "Bob");
    assert_eq!(body["comments"][0]["text"], "Great");
}

#[rstest]
#[actix_web::test]
async fn search_is_routed_ahead_of_item_lookup() {
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_search_items()
        .withf(|text, page| text == "dRiLl" && *page == PageRequest::try_new(5, 2).expect("page"))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/items/search?text=dRiLl&from=5&size=2")
        .to_request();
    let body: Vec<ItemResponse> = actix_test::call_and_read_body_json(&app, req).await;

    assert!(body.is_empty());
}

#[rstest]
#[actix_web::test]
async fn search_without_text_searches_for_blank(owner: UserId) {
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_search_items()
        .withf(|text, _| text.is_empty())
        .returning(|_, _| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/items/search")
        .insert_header(sharer(&owner))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case("/items?from=-1")]
#[case("/items?size=0")]
#[case("/items?size=ten")]
#[actix_web::test]
async fn owner_listing_rejects_bad_pages(owner: UserId, #[case] uri: &str) {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri(uri)
        .insert_header(sharer(&owner))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn non_owner_update_surfaces_not_found(owner: UserId) {
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_update_item()
        .returning(|_, id, _| Err(Error::not_found(format!("item {id} not found"))));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/items/{}", ItemId::generate()))
        .insert_header(sharer(&owner))
        .set_json(json!({"available": false}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn comment_text_is_forwarded(owner: UserId) {
    let item_id = ItemId::generate();
    let created = chrono::Utc
        .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
        .single()
        .expect("valid instant");
    let comment = Comment::try_new(CommentId::generate(), item_id, owner, "Nice", created)
        .expect("valid comment");
    let authored = AuthoredComment {
        comment,
        author_name: "Ada".to_owned(),
    };
    let mut ports = MockPorts::default();
    ports
        .items
        .expect_add_comment()
        .withf(move |author, id, text| *author == owner && *id == item_id && text == "Nice")
        .times(1)
        .returning(move |_, _, _| Ok(authored.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri(&format!("/items/{item_id}/comment"))
        .insert_header(sharer(&owner))
        .set_json(json!({"text": "Nice"}))
        .to_request();
    let body: CommentResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.author_name, "Ada");
    assert_eq!(body.created, created);
}
