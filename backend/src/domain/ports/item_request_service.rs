//! Driving port for item requests.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, ItemRequest, ItemRequestId, ItemRequestView, UserId};

/// Item request use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestService: Send + Sync {
    /// Post a request for an item.
    async fn create_request(
        &self,
        requester_id: &UserId,
        description: String,
    ) -> Result<ItemRequest, Error>;

    /// The caller's own requests, newest first.
    async fn list_own_requests(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ItemRequestView>, Error>;

    /// Other users' requests, newest first.
    async fn list_other_requests(
        &self,
        requester_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestView>, Error>;

    /// One request with its items.
    async fn get_request(
        &self,
        viewer_id: &UserId,
        request_id: &ItemRequestId,
    ) -> Result<ItemRequestView, Error>;
}
