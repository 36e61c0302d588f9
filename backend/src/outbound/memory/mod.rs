//! In-memory entity store.
//!
//! Implements every repository port over a single lock-protected set of
//! tables. The server falls back to it when no database URL is configured,
//! and integration tests drive the full HTTP stack against it.
//!
//! One `RwLock` guards all tables so multi-table operations (cascading
//! deletes, compare-and-set status updates) are atomic.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::ports::{
    BookingPersistenceError, BookingRepository, CommentPersistenceError, CommentRepository,
    ItemPersistenceError, ItemRepository, ItemRequestPersistenceError, ItemRequestRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthoredComment, Booking, BookingId, BookingQuery, BookingStatus, Comment, Item, ItemId,
    ItemRequest, ItemRequestId, User, UserId,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    items: BTreeMap<ItemId, Item>,
    bookings: HashMap<BookingId, Booking>,
    comments: Vec<Comment>,
    requests: HashMap<ItemRequestId, ItemRequest>,
}

impl Tables {
    fn owner_of(&self, booking: &Booking) -> Option<UserId> {
        self.items.get(booking.item_id()).map(|item| *item.owner_id())
    }

    fn remove_user(&mut self, id: &UserId) -> bool {
        if self.users.remove(id).is_none() {
            return false;
        }
        let owned: Vec<ItemId> = self
            .items
            .values()
            .filter(|item| item.is_owned_by(id))
            .map(|item| *item.id())
            .collect();
        for item_id in &owned {
            self.items.remove(item_id);
        }
        self.bookings
            .retain(|_, b| b.booker_id() != id && !owned.contains(b.item_id()));
        self.comments
            .retain(|c| c.author_id() != id && !owned.contains(c.item_id()));
        self.requests.retain(|_, r| r.requester_id() != id);
        let requests = &self.requests;
        for item in self.items.values_mut() {
            if item.request_id().is_some_and(|rid| !requests.contains_key(rid)) {
                *item = item.detached_from_request();
            }
        }
        true
    }
}

/// Thread-safe in-memory implementation of all repository ports.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, &'static str> {
        self.tables.read().map_err(|_| POISONED)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, &'static str> {
        self.tables.write().map_err(|_| POISONED)
    }
}

fn newest_first(requests: &mut [ItemRequest]) {
    requests.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.write().map_err(UserPersistenceError::query)?;
        let taken = tables
            .users
            .values()
            .any(|other| other.id() != user.id() && other.email() == user.email());
        if taken {
            return Err(UserPersistenceError::duplicate_email(user.email().as_str()));
        }
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.read().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.read().map_err(UserPersistenceError::query)?;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(users)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.write().map_err(UserPersistenceError::query)?;
        Ok(tables.remove_user(id))
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn save(&self, item: &Item) -> Result<(), ItemPersistenceError> {
        let mut tables = self.write().map_err(ItemPersistenceError::query)?;
        tables.items.insert(*item.id(), item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let tables = self.read().map_err(ItemPersistenceError::query)?;
        Ok(tables.items.get(id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemPersistenceError> {
        let tables = self.read().map_err(ItemPersistenceError::query)?;
        Ok(page
            .apply(tables.items.values().filter(|item| item.is_owned_by(owner_id)))
            .cloned()
            .collect())
    }

    async fn search_available(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemPersistenceError> {
        let tables = self.read().map_err(ItemPersistenceError::query)?;
        Ok(page
            .apply(
                tables
                    .items
                    .values()
                    .filter(|item| item.available() && item.matches_text(text)),
            )
            .cloned()
            .collect())
    }

    async fn list_by_request(
        &self,
        request_id: &ItemRequestId,
    ) -> Result<Vec<Item>, ItemPersistenceError> {
        let tables = self.read().map_err(ItemPersistenceError::query)?;
        Ok(tables
            .items
            .values()
            .filter(|item| item.request_id() == Some(request_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn save(&self, booking: &Booking) -> Result<(), BookingPersistenceError> {
        let mut tables = self.write().map_err(BookingPersistenceError::query)?;
        tables.bookings.insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingPersistenceError> {
        let tables = self.read().map_err(BookingPersistenceError::query)?;
        Ok(tables.bookings.get(id).cloned())
    }

    async fn list(&self, query: &BookingQuery) -> Result<Vec<Booking>, BookingPersistenceError> {
        let tables = self.read().map_err(BookingPersistenceError::query)?;
        Ok(query.evaluate(tables.bookings.values(), |b| tables.owner_of(b)))
    }

    async fn find_last(
        &self,
        item_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingPersistenceError> {
        let tables = self.read().map_err(BookingPersistenceError::query)?;
        Ok(tables
            .bookings
            .values()
            .filter(|b| b.item_id() == item_id && b.start() < now)
            .max_by_key(|b| b.start())
            .cloned())
    }

    async fn find_next(
        &self,
        item_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingPersistenceError> {
        let tables = self.read().map_err(BookingPersistenceError::query)?;
        Ok(tables
            .bookings
            .values()
            .filter(|b| {
                b.item_id() == item_id && b.start() > now && b.status() == BookingStatus::Approved
            })
            .min_by_key(|b| b.start())
            .cloned())
    }

    async fn list_by_booker_and_item(
        &self,
        booker_id: &UserId,
        item_id: &ItemId,
    ) -> Result<Vec<Booking>, BookingPersistenceError> {
        let tables = self.read().map_err(BookingPersistenceError::query)?;
        Ok(tables
            .bookings
            .values()
            .filter(|b| b.booker_id() == booker_id && b.item_id() == item_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        new: BookingStatus,
    ) -> Result<bool, BookingPersistenceError> {
        let mut tables = self.write().map_err(BookingPersistenceError::query)?;
        match tables.bookings.get_mut(id) {
            Some(booking) if booking.status() == expected => {
                *booking = booking.with_status(new);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn save(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut tables = self.write().map_err(CommentPersistenceError::query)?;
        tables.comments.push(comment.clone());
        Ok(())
    }

    async fn list_by_item(
        &self,
        item_id: &ItemId,
    ) -> Result<Vec<AuthoredComment>, CommentPersistenceError> {
        let tables = self.read().map_err(CommentPersistenceError::query)?;
        let mut found: Vec<AuthoredComment> = tables
            .comments
            .iter()
            .filter(|c| c.item_id() == item_id)
            .filter_map(|c| {
                tables.users.get(c.author_id()).map(|author| AuthoredComment {
                    comment: c.clone(),
                    author_name: author.name().to_owned(),
                })
            })
            .collect();
        found.sort_by_key(|c| c.comment.created_at());
        Ok(found)
    }
}

#[async_trait]
impl ItemRequestRepository for InMemoryStore {
    async fn save(&self, request: &ItemRequest) -> Result<(), ItemRequestPersistenceError> {
        let mut tables = self.write().map_err(ItemRequestPersistenceError::query)?;
        tables.requests.insert(*request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ItemRequestId,
    ) -> Result<Option<ItemRequest>, ItemRequestPersistenceError> {
        let tables = self.read().map_err(ItemRequestPersistenceError::query)?;
        Ok(tables.requests.get(id).cloned())
    }

    async fn list_by_requester(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ItemRequest>, ItemRequestPersistenceError> {
        let tables = self.read().map_err(ItemRequestPersistenceError::query)?;
        let mut found: Vec<ItemRequest> = tables
            .requests
            .values()
            .filter(|r| r.requester_id() == requester_id)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn list_excluding_requester(
        &self,
        requester_id: &UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestPersistenceError> {
        let tables = self.read().map_err(ItemRequestPersistenceError::query)?;
        let mut found: Vec<ItemRequest> = tables
            .requests
            .values()
            .filter(|r| r.requester_id() != requester_id)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(page.apply(found).collect())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
