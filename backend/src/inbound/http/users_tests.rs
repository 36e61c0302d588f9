//! Tests for users HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::inbound::http::test_utils::{MockPorts, test_app};

fn ada() -> User {
    User::try_new(UserId::generate(), "Ada", "ada@example.com").expect("valid user")
}

#[rstest]
#[actix_web::test]
async fn create_user_returns_the_stored_user() {
    let user = ada();
    let returned = user.clone();
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|new_user| new_user.name == "Ada" && new_user.email == "ada@example.com")
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
        .to_request();
    let body: UserResponse = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, UserResponse::from(user));
}

#[rstest]
#[actix_web::test]
async fn absent_fields_reach_validation_as_blank() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|new_user| new_user.name.is_empty() && new_user.email.is_empty())
        .returning(|_| Err(Error::invalid_request("name must not be blank")));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_maps_to_conflict() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create_user()
        .returning(|_| Err(Error::conflict("email ada@example.com is already registered")));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn patch_forwards_only_supplied_fields() {
    let user = ada();
    let id = *user.id();
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_update_user()
        .withf(move |got, patch| {
            *got == id && patch.name.is_none() && patch.email.as_deref() == Some("a@b.io")
        })
        .times(1)
        .returning(move |_, _| Ok(user.clone()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::patch()
        .uri(&format!("/users/{id}"))
        .set_json(json!({"email": "a@b.io"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn unknown_user_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_get_user()
        .returning(|id| Err(Error::not_found(format!("user {id} not found"))));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/users/{}", UserId::generate()))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn malformed_path_id_is_a_bad_request() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/users/not-a-uuid")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn list_and_delete_delegate_to_the_service() {
    let user = ada();
    let id = *user.id();
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_list_users()
        .times(1)
        .returning(move || Ok(vec![user.clone()]));
    ports
        .users
        .expect_delete_user()
        .withf(move |got| *got == id)
        .times(1)
        .returning(|_| Ok(()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let listed: Vec<UserResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(listed.len(), 1);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}
