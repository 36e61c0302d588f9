//! Bookings API handlers.
//!
//! ```text
//! POST  /bookings                         {"itemId":"…","start":"…","end":"…"}
//! PATCH /bookings/{id}?approved=true
//! GET   /bookings/{id}
//! GET   /bookings?state=ALL&from=0&size=10
//! GET   /bookings/owner?state=FUTURE
//! ```

use actix_web::{get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Booking, BookingDraft, BookingId, BookingStatus, BookingSubject, ItemId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::SharerUserId;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{PageQuery, missing_field_error};

/// State used when the client omits `state`.
const DEFAULT_STATE: &str = "ALL";

/// Request body for `POST /bookings`.
///
/// `start` and `end` stay optional here so the window rules report which
/// bound is missing.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: Option<Uuid>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TryFrom<CreateBookingRequest> for BookingDraft {
    type Error = crate::domain::Error;

    fn try_from(value: CreateBookingRequest) -> Result<Self, Self::Error> {
        let item_id = value.item_id.ok_or_else(|| missing_field_error("itemId"))?;
        Ok(Self {
            item_id: ItemId::from_uuid(item_id),
            start: value.start,
            end: value.end,
        })
    }
}

/// Query string for `PATCH /bookings/{id}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DecisionQuery {
    /// `true` approves, `false` rejects.
    pub approved: Option<bool>,
}

/// Query string for the booking list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// One of ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED. Defaults to ALL.
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Booking representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[schema(value_type = String, example = "WAITING")]
    pub status: BookingStatus,
    pub item_id: Uuid,
    pub booker_id: Uuid,
}

impl From<&Booking> for BookingResponse {
    fn from(value: &Booking) -> Self {
        Self {
            id: *value.id().as_uuid(),
            start: value.start(),
            end: value.end(),
            status: value.status(),
            item_id: *value.item_id().as_uuid(),
            booker_id: *value.booker_id().as_uuid(),
        }
    }
}

fn to_responses(bookings: &[Booking]) -> Vec<BookingResponse> {
    bookings.iter().map(BookingResponse::from).collect()
}

/// Request a booking. New bookings start as WAITING.
#[utoipa::path(
    post,
    path = "/bookings",
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")),
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid window or item unavailable", body = ErrorSchema),
        (status = 404, description = "Unknown user or item, or own item", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<web::Json<BookingResponse>> {
    let draft = BookingDraft::try_from(payload.into_inner())?;
    let booking = state.bookings.create_booking(caller.user_id(), draft).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Approve or reject a waiting booking. Item owner only.
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking identifier"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user"),
        DecisionQuery
    ),
    responses(
        (status = 200, description = "Decided booking", body = BookingResponse),
        (status = 400, description = "Booking already decided", body = ErrorSchema),
        (status = 404, description = "Unknown booking or not the owner", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "decideBooking"
)]
#[patch("/bookings/{id}")]
pub async fn decide_booking(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    path: web::Path<Uuid>,
    query: web::Query<DecisionQuery>,
) -> ApiResult<web::Json<BookingResponse>> {
    let approved = query
        .into_inner()
        .approved
        .ok_or_else(|| missing_field_error("approved"))?;
    let booking_id = BookingId::from_uuid(path.into_inner());
    let booking = state
        .bookings
        .decide_booking(caller.user_id(), &booking_id, approved)
        .await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Fetch one booking. Visible to its booker and the item owner.
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking identifier"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Booking", body = BookingResponse),
        (status = 404, description = "Unknown or not visible", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking_id = BookingId::from_uuid(path.into_inner());
    let booking = state
        .bookings
        .get_booking(caller.user_id(), &booking_id)
        .await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

async fn list_for(
    state: &HttpState,
    subject: BookingSubject,
    query: BookingListQuery,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let BookingListQuery {
        state: booking_state,
        from,
        size,
    } = query;
    let page = PageQuery { from, size }.to_page()?;
    let bookings = state
        .bookings
        .list_bookings(
            subject,
            booking_state.as_deref().unwrap_or(DEFAULT_STATE),
            page,
        )
        .await?;
    Ok(web::Json(to_responses(&bookings)))
}

/// Bookings the caller made, newest start first.
#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 400, description = "Unknown state or invalid page", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookerBookings"
)]
#[get("/bookings")]
pub async fn list_booker_bookings(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    query: web::Query<BookingListQuery>,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    list_for(
        &state,
        BookingSubject::Booker(caller.into_inner()),
        query.into_inner(),
    )
    .await
}

/// Bookings on the caller's items, newest start first.
#[utoipa::path(
    get,
    path = "/bookings/owner",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 400, description = "Unknown state or invalid page", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listOwnerBookings"
)]
#[get("/bookings/owner")]
pub async fn list_owner_bookings(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    query: web::Query<BookingListQuery>,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    list_for(
        &state,
        BookingSubject::Owner(caller.into_inner()),
        query.into_inner(),
    )
    .await
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
