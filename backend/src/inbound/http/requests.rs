//! Item request ("wanted") API handlers.
//!
//! ```text
//! POST /requests               {"description":"Need a ladder"}
//! GET  /requests               caller's own requests
//! GET  /requests/all?from=0&size=10
//! GET  /requests/{id}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ItemRequest, ItemRequestId, ItemRequestView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::SharerUserId;
use crate::inbound::http::items::ItemResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::PageQuery;

/// Request body for `POST /requests`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequestRequest {
    #[serde(default)]
    pub description: String,
}

/// Item request with the items offered against it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestResponse {
    pub id: Uuid,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemResponse>,
}

impl ItemRequestResponse {
    fn bare(request: &ItemRequest) -> Self {
        Self {
            id: *request.id().as_uuid(),
            description: request.description().to_owned(),
            created: request.created_at(),
            items: Vec::new(),
        }
    }
}

impl From<ItemRequestView> for ItemRequestResponse {
    fn from(value: ItemRequestView) -> Self {
        Self {
            items: value.items.iter().map(ItemResponse::from).collect(),
            ..Self::bare(&value.request)
        }
    }
}

fn to_responses(views: Vec<ItemRequestView>) -> Vec<ItemRequestResponse> {
    views.into_iter().map(ItemRequestResponse::from).collect()
}

/// Publish a request for an item nobody offers yet.
#[utoipa::path(
    post,
    path = "/requests",
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")),
    request_body = CreateItemRequestRequest,
    responses(
        (status = 200, description = "Request created", body = ItemRequestResponse),
        (status = 400, description = "Blank description", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createItemRequest"
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    payload: web::Json<CreateItemRequestRequest>,
) -> ApiResult<web::Json<ItemRequestResponse>> {
    let request = state
        .requests
        .create_request(caller.user_id(), payload.into_inner().description)
        .await?;
    Ok(web::Json(ItemRequestResponse::bare(&request)))
}

/// The caller's own requests, newest first.
#[utoipa::path(
    get,
    path = "/requests",
    params(("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Own requests", body = [ItemRequestResponse]),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listOwnItemRequests"
)]
#[get("/requests")]
pub async fn list_own_requests(
    state: web::Data<HttpState>,
    caller: SharerUserId,
) -> ApiResult<web::Json<Vec<ItemRequestResponse>>> {
    let views = state.requests.list_own_requests(caller.user_id()).await?;
    Ok(web::Json(to_responses(views)))
}

/// Other users' requests, newest first.
#[utoipa::path(
    get,
    path = "/requests/all",
    params(
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Requests by other users", body = [ItemRequestResponse]),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listOtherItemRequests"
)]
#[get("/requests/all")]
pub async fn list_other_requests(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<ItemRequestResponse>>> {
    let page = query.into_inner().to_page()?;
    let views = state
        .requests
        .list_other_requests(caller.user_id(), page)
        .await?;
    Ok(web::Json(to_responses(views)))
}

/// Fetch one request with its items.
#[utoipa::path(
    get,
    path = "/requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request identifier"),
        ("X-Sharer-User-Id" = Uuid, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Request", body = ItemRequestResponse),
        (status = 404, description = "Unknown request or user", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "getItemRequest"
)]
#[get("/requests/{id}")]
pub async fn get_request(
    state: web::Data<HttpState>,
    caller: SharerUserId,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ItemRequestResponse>> {
    let request_id = ItemRequestId::from_uuid(path.into_inner());
    let view = state
        .requests
        .get_request(caller.user_id(), &request_id)
        .await?;
    Ok(web::Json(ItemRequestResponse::from(view)))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
