//! Port for item request persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{ItemRequest, ItemRequestId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item request repository adapters.
    pub enum ItemRequestPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "item request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item request repository query failed: {message}",
    }
}

/// Store of item requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    /// Insert a request.
    async fn save(&self, request: &ItemRequest) -> Result<(), ItemRequestPersistenceError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: &ItemRequestId,
    ) -> Result<Option<ItemRequest>, ItemRequestPersistenceError>;

    /// Requests made by `requester_id`, newest first.
    async fn list_by_requester(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ItemRequest>, ItemRequestPersistenceError>;

    /// Requests made by anyone except `requester_id`, newest first.
    async fn list_excluding_requester(
        &self,
        requester_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestPersistenceError>;
}
