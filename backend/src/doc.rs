//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in [`crate::inbound::http`], the
//! request/response bodies they use, and the error schema wrappers from
//! [`crate::inbound::http::schemas`]. The document backs Swagger UI in debug
//! builds and is exported via `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::bookings::{BookingResponse, CreateBookingRequest};
use crate::inbound::http::items::{
    BookingSummary, CommentRequest, CommentResponse, CreateItemRequest, ItemResponse,
    ItemViewResponse, UpdateItemRequest,
};
use crate::inbound::http::requests::{CreateItemRequestRequest, ItemRequestResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Register the caller identity header as the API's security scheme.
struct SharerHeaderAddon;

impl Modify for SharerHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SharerUserId",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Sharer-User-Id",
                "Identifier of the acting user, set by the upstream gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SharerHeaderAddon),
    info(
        title = "ShareIt backend API",
        description = "Users list items, other users book them, owners decide."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::list_owner_items,
        crate::inbound::http::items::search_items,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::add_comment,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::decide_booking,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::list_booker_bookings,
        crate::inbound::http::bookings::list_owner_bookings,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::list_own_requests,
        crate::inbound::http::requests::list_other_requests,
        crate::inbound::http::requests::get_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserRequest,
        UpdateUserRequest,
        UserResponse,
        CreateItemRequest,
        UpdateItemRequest,
        ItemResponse,
        ItemViewResponse,
        BookingSummary,
        CommentRequest,
        CommentResponse,
        CreateBookingRequest,
        BookingResponse,
        CreateItemRequestRequest,
        ItemRequestResponse,
    )),
    tags(
        (name = "users", description = "User registration and profile"),
        (name = "items", description = "Items, search and comments"),
        (name = "bookings", description = "Booking lifecycle and listings"),
        (name = "requests", description = "Requests for items nobody offers yet"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_booking_schema_exposes_flat_ids() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let booking = schemas.get("BookingResponse").expect("BookingResponse schema");

        assert_object_schema_has_field(booking, "itemId");
        assert_object_schema_has_field(booking, "bookerId");
        assert_object_schema_has_field(booking, "status");
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users",
            "/users/{id}",
            "/items",
            "/items/search",
            "/items/{id}",
            "/items/{id}/comment",
            "/bookings",
            "/bookings/owner",
            "/bookings/{id}",
            "/requests",
            "/requests/all",
            "/requests/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
