//! Port for item persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Item, ItemId, ItemRequestId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item repository adapters.
    pub enum ItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

/// Store of shareable items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert or replace an item.
    async fn save(&self, item: &Item) -> Result<(), ItemPersistenceError>;

    /// Fetch an item by identifier.
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemPersistenceError>;

    /// Items owned by `owner_id`, ordered by id.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemPersistenceError>;

    /// Available items whose name or description contains `text`,
    /// ignoring case, ordered by id.
    async fn search_available(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemPersistenceError>;

    /// Items offered against a request, ordered by id.
    async fn list_by_request(
        &self,
        request_id: &ItemRequestId,
    ) -> Result<Vec<Item>, ItemPersistenceError>;
}
