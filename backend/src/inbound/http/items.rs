//! Items API handlers.
//!
//! ```text
//! POST  /items                      {"name":"Drill","description":"Cordless","available":true}
//! GET   /items?from=0&size=10       caller's items, aggregated
//! GET   /items/search?text=drill
//! GET   /items/{id}
//! PATCH /items/{id}                 {"available":false}
//! POST  /items/{id}/comment         {"text":"Worked great"}
//! ```

use actix_web::{get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    AuthoredComment, BookingRef, Item, ItemDraft, ItemId, ItemPatch, ItemRequestId, ItemView,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::SharerUserId;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{PageQuery, missing_field_error};

/// Request body for `POST /items`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub available: Option<bool>,
    /// Request this item answers, if any.
    pub request_id: Option<Uuid>,
}

impl TryFrom<CreateItemRequest> for ItemDraft {
    type Error = crate::domain::Error;

    fn try_from(value: CreateItemRequest) -> Result<Self, Self::Error> {
        let available = value
            .available
            .ok_or_else(|| missing_field_error("available"))?;
        Ok(Self {
            name: value.name,
            description: value.description,
            available,
            request_id: value.request_id.map(ItemRequestId::from_uuid),
        })
    }
}

/// Request body for `PATCH /items/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(value: UpdateItemRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            available: value.available,
        }
    }
}

/// Request body for `POST /items/{id}/comment`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

/// Query string for `GET /items/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the name or description.
    pub text: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Plain item representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
}

impl From<&Item> for ItemResponse {
    fn from(value: &Item) -> Self {
        Self {
            id: *value.id().as_uuid(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            available: value.available(),
            request_id: value.request_id().map(|id| *id.as_uuid()),
        }
    }
}

/// Last or next booking shown to an item's owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: Uuid,
    pub booker_id: Uuid,
}

impl From<BookingRef> for BookingSummary {
    fn from(value: BookingRef) -> Self {
        Self {
            id: *value.id.as_uuid(),
            booker_id: *value.booker_id.as_uuid(),
        }
    }
}

/// Comment with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<AuthoredComment> for CommentResponse {
    fn from(value: AuthoredComment) -> Self {
        Self {
            id: *value.comment.id().as_uuid(),
            text: value.comment.text().to_owned(),
            author_name: value.author_name,
            created: value.comment.created_at(),
        }
    }
}

/// Aggregated item view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemViewResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
    /// Owner only.
    pub last_booking: Option<BookingSummary>,
    /// Owner only.
    pub next_booking: Option<BookingSummary>,
    pub comments: Vec<CommentResponse>,
}

impl From<ItemView> for ItemViewResponse {
    fn from(value: ItemView) -> Self {
        let item = ItemResponse::from(&value.item);
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking: value.last_booking.map(BookingSummary::from),
            next_booking: value.next_booking.map(BookingSummary::from),
            comments: value.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Offer a new item.
#[utoipa::path(
    post,
    path = "/items",
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")),
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid item", body = ErrorSchema),
        (status = 404, description = "Unknown owner or request", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let draft = ItemDraft::try_from(payload.into_inner())?;
    let item = state.items.create_item(caller.user_id(), draft).await?;
    Ok(web::Json(ItemResponse::from(&item)))
}

/// List the caller's items with booking context and comments.
#[utoipa::path(
    get,
    path = "/items",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Owned items", body = [ItemViewResponse]),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listOwnerItems"
)]
#[get("/items")]
pub async fn list_owner_items(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<ItemViewResponse>>> {
    let page = query.into_inner().to_page()?;
    let views = state.items.list_owner_items(caller.user_id(), page).await?;
    Ok(web::Json(
        views.into_iter().map(ItemViewResponse::from).collect(),
    ))
}

/// Search available items by text.
#[utoipa::path(
    get,
    path = "/items/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = [ItemResponse]),
        (status = 400, description = "Invalid page", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "searchItems"
)]
#[get("/items/search")]
pub async fn search_items(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let SearchQuery { text, from, size } = query.into_inner();
    let page = PageQuery { from, size }.to_page()?;
    let items = state
        .items
        .search_items(text.as_deref().unwrap_or_default(), page)
        .await?;
    Ok(web::Json(items.iter().map(ItemResponse::from).collect()))
}

/// Fetch one item. Booking context is included for the owner only.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item identifier"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Item view", body = ItemViewResponse),
        (status = 404, description = "Unknown item", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ItemViewResponse>> {
    let item_id = ItemId::from_uuid(path.into_inner());
    let view = state.items.get_item(caller.user_id(), &item_id).await?;
    Ok(web::Json(ItemViewResponse::from(view)))
}

/// Partially update an item. Owner only.
#[utoipa::path(
    patch,
    path = "/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item identifier"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 404, description = "Unknown item or not the owner", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[patch("/items/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let item_id = ItemId::from_uuid(path.into_inner());
    let item = state
        .items
        .update_item(caller.user_id(), &item_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ItemResponse::from(&item)))
}

/// Comment on an item the caller has rented.
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    params(
        ("id" = Uuid, Path, description = "Item identifier"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment stored", body = CommentResponse),
        (status = 400, description = "Blank text or no completed rental", body = ErrorSchema),
        (status = 404, description = "Unknown item or user", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "addComment"
)]
#[post("/items/{id}/comment")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    path: web::Path<Uuid>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let item_id = ItemId::from_uuid(path.into_inner());
    let comment = state
        .items
        .add_comment(caller.user_id(), &item_id, payload.into_inner().text)
        .await?;
    Ok(web::Json(CommentResponse::from(comment)))
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
