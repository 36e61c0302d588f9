//! Item request service.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use super::ports::{ItemRepository, ItemRequestRepository, ItemRequestService, UserRepository};
use super::rules::{require_request_exists, require_user_exists};
use super::store_errors::{map_item_error, map_item_request_error};
use super::{Error, ItemRequest, ItemRequestId, ItemRequestView, UserId};

/// [`ItemRequestService`] over the entity store.
pub struct ItemRequestServiceImpl<U: ?Sized, I: ?Sized, Q: ?Sized> {
    users: Arc<U>,
    items: Arc<I>,
    requests: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, I: ?Sized, Q: ?Sized> ItemRequestServiceImpl<U, I, Q> {
    pub fn new(users: Arc<U>, items: Arc<I>, requests: Arc<Q>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            items,
            requests,
            clock,
        }
    }
}

impl<U, I, Q> ItemRequestServiceImpl<U, I, Q>
where
    U: ?Sized,
    I: ItemRepository + ?Sized,
    Q: ?Sized,
{
    async fn with_items(&self, request: ItemRequest) -> Result<ItemRequestView, Error> {
        let items = self
            .items
            .list_by_request(request.id())
            .await
            .map_err(map_item_error)?;
        Ok(ItemRequestView { request, items })
    }

    async fn with_items_all(
        &self,
        requests: Vec<ItemRequest>,
    ) -> Result<Vec<ItemRequestView>, Error> {
        try_join_all(requests.into_iter().map(|request| self.with_items(request))).await
    }
}

#[async_trait]
impl<U, I, Q> ItemRequestService for ItemRequestServiceImpl<U, I, Q>
where
    U: UserRepository + ?Sized,
    I: ItemRepository + ?Sized,
    Q: ItemRequestRepository + ?Sized,
{
    async fn create_request(
        &self,
        requester_id: &UserId,
        description: String,
    ) -> Result<ItemRequest, Error> {
        let now = self.clock.utc();
        require_user_exists(self.users.as_ref(), requester_id).await?;
        let request = ItemRequest::try_new(ItemRequestId::generate(), *requester_id, description, now)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.requests
            .save(&request)
            .await
            .map_err(map_item_request_error)?;
        info!(request_id = %request.id(), requester_id = %requester_id, "item request created");
        Ok(request)
    }

    async fn list_own_requests(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ItemRequestView>, Error> {
        require_user_exists(self.users.as_ref(), requester_id).await?;
        let requests = self
            .requests
            .list_by_requester(requester_id)
            .await
            .map_err(map_item_request_error)?;
        self.with_items_all(requests).await
    }

    async fn list_other_requests(
        &self,
        requester_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestView>, Error> {
        require_user_exists(self.users.as_ref(), requester_id).await?;
        let requests = self
            .requests
            .list_excluding_requester(requester_id, page)
            .await
            .map_err(map_item_request_error)?;
        self.with_items_all(requests).await
    }

    async fn get_request(
        &self,
        viewer_id: &UserId,
        request_id: &ItemRequestId,
    ) -> Result<ItemRequestView, Error> {
        require_user_exists(self.users.as_ref(), viewer_id).await?;
        let request = require_request_exists(self.requests.as_ref(), request_id).await?;
        self.with_items(request).await
    }
}
