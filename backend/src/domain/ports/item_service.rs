//! Driving port for items and their comments.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{
    AuthoredComment, Error, Item, ItemDraft, ItemId, ItemPatch, ItemView, UserId,
};

/// Item use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Offer a new item.
    async fn create_item(&self, owner_id: &UserId, draft: ItemDraft) -> Result<Item, Error>;

    /// Owner-only partial update.
    async fn update_item(
        &self,
        owner_id: &UserId,
        item_id: &ItemId,
        patch: ItemPatch,
    ) -> Result<Item, Error>;

    /// Aggregated view of one item as seen by `viewer_id`.
    async fn get_item(&self, viewer_id: &UserId, item_id: &ItemId) -> Result<ItemView, Error>;

    /// Aggregated views of the owner's items.
    async fn list_owner_items(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemView>, Error>;

    /// Available items matching `text`. Blank text yields no items.
    async fn search_items(&self, text: &str, page: PageRequest) -> Result<Vec<Item>, Error>;

    /// Leave a comment on an item the author has rented.
    async fn add_comment(
        &self,
        author_id: &UserId,
        item_id: &ItemId,
        text: String,
    ) -> Result<AuthoredComment, Error>;
}
