//! Item service: item CRUD, search, aggregation and comments.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use super::item_view::{ItemAggregator, ItemView};
use super::ports::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, ItemService,
    UserRepository,
};
use super::rules::{
    require_comment_eligibility, require_item_exists, require_owner, require_request_exists,
    require_user_exists,
};
use super::store_errors::{map_comment_error, map_item_error};
use super::{
    AuthoredComment, Comment, CommentId, Error, Item, ItemDraft, ItemId, ItemPatch, UserId,
};

/// Repositories the item service reads and writes.
pub struct ItemStores<U: ?Sized, I: ?Sized, B: ?Sized, C: ?Sized, Q: ?Sized> {
    pub users: Arc<U>,
    pub items: Arc<I>,
    pub bookings: Arc<B>,
    pub comments: Arc<C>,
    pub requests: Arc<Q>,
}

/// [`ItemService`] over the entity store.
pub struct ItemServiceImpl<U: ?Sized, I: ?Sized, B: ?Sized, C: ?Sized, Q: ?Sized> {
    users: Arc<U>,
    items: Arc<I>,
    bookings: Arc<B>,
    requests: Arc<Q>,
    aggregator: ItemAggregator<B, C>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<U, I, B, C, Q> ItemServiceImpl<U, I, B, C, Q>
where
    U: ?Sized,
    I: ?Sized,
    B: BookingRepository + ?Sized,
    C: CommentRepository + ?Sized,
    Q: ?Sized,
{
    pub fn new(stores: ItemStores<U, I, B, C, Q>, clock: Arc<dyn Clock>) -> Self {
        let ItemStores {
            users,
            items,
            bookings,
            comments,
            requests,
        } = stores;
        Self {
            aggregator: ItemAggregator::new(Arc::clone(&bookings), Arc::clone(&comments)),
            users,
            items,
            bookings,
            requests,
            comments,
            clock,
        }
    }
}

#[async_trait]
impl<U, I, B, C, Q> ItemService for ItemServiceImpl<U, I, B, C, Q>
where
    U: UserRepository + ?Sized,
    I: ItemRepository + ?Sized,
    B: BookingRepository + ?Sized,
    C: CommentRepository + ?Sized,
    Q: ItemRequestRepository + ?Sized,
{
    async fn create_item(&self, owner_id: &UserId, draft: ItemDraft) -> Result<Item, Error> {
        require_user_exists(self.users.as_ref(), owner_id).await?;
        if let Some(request_id) = draft.request_id.as_ref() {
            require_request_exists(self.requests.as_ref(), request_id).await?;
        }
        let item = Item::try_new(ItemId::generate(), *owner_id, draft)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.items.save(&item).await.map_err(map_item_error)?;
        info!(item_id = %item.id(), owner_id = %owner_id, "item created");
        Ok(item)
    }

    async fn update_item(
        &self,
        owner_id: &UserId,
        item_id: &ItemId,
        patch: ItemPatch,
    ) -> Result<Item, Error> {
        let current = require_owner(self.items.as_ref(), owner_id, item_id).await?;
        let updated = current.patched(&patch);
        self.items.save(&updated).await.map_err(map_item_error)?;
        info!(item_id = %item_id, "item updated");
        Ok(updated)
    }

    async fn get_item(&self, viewer_id: &UserId, item_id: &ItemId) -> Result<ItemView, Error> {
        let now = self.clock.utc();
        require_user_exists(self.users.as_ref(), viewer_id).await?;
        let item = require_item_exists(self.items.as_ref(), item_id).await?;
        self.aggregator.aggregate(item, viewer_id, now).await
    }

    async fn list_owner_items(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemView>, Error> {
        let now = self.clock.utc();
        require_user_exists(self.users.as_ref(), owner_id).await?;
        let items = self
            .items
            .list_by_owner(owner_id, page)
            .await
            .map_err(map_item_error)?;
        self.aggregator.aggregate_all(items, owner_id, now).await
    }

    async fn search_items(&self, text: &str, page: PageRequest) -> Result<Vec<Item>, Error> {
        let needle = text.trim();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        self.items
            .search_available(needle, page)
            .await
            .map_err(map_item_error)
    }

    async fn add_comment(
        &self,
        author_id: &UserId,
        item_id: &ItemId,
        text: String,
    ) -> Result<AuthoredComment, Error> {
        let now = self.clock.utc();
        let author = require_user_exists(self.users.as_ref(), author_id).await?;
        let item = require_item_exists(self.items.as_ref(), item_id).await?;
        let comment = Comment::try_new(CommentId::generate(), *item.id(), *author_id, text, now)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        require_comment_eligibility(self.bookings.as_ref(), author_id, item_id, now).await?;
        self.comments
            .save(&comment)
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id(), item_id = %item_id, "comment added");
        Ok(AuthoredComment {
            comment,
            author_name: author.name().to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
