//! Compose domain services over the configured entity store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use shareit::domain::ports::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};
use shareit::domain::{
    BookingServiceImpl, DecisionPolicy, ItemRequestServiceImpl, ItemServiceImpl, ItemStores,
    UserServiceImpl,
};
use shareit::inbound::http::state::HttpState;
use shareit::outbound::memory::InMemoryStore;
use shareit::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselCommentRepository, DieselItemRepository,
    DieselItemRequestRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Wire every driving port over one set of repositories.
fn compose<U, I, B, C, Q>(
    stores: ItemStores<U, I, B, C, Q>,
    clock: Arc<dyn Clock>,
    policy: DecisionPolicy,
) -> HttpState
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    Q: ItemRequestRepository + 'static,
{
    let users = Arc::new(UserServiceImpl::new(Arc::clone(&stores.users)));
    let bookings = Arc::new(
        BookingServiceImpl::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.items),
            Arc::clone(&stores.bookings),
            Arc::clone(&clock),
        )
        .with_policy(policy),
    );
    let requests = Arc::new(ItemRequestServiceImpl::new(
        Arc::clone(&stores.users),
        Arc::clone(&stores.items),
        Arc::clone(&stores.requests),
        Arc::clone(&clock),
    ));
    let items = Arc::new(ItemServiceImpl::new(stores, clock));
    HttpState::new(users, items, bookings, requests)
}

fn diesel_stores(
    pool: &DbPool,
) -> ItemStores<
    DieselUserRepository,
    DieselItemRepository,
    DieselBookingRepository,
    DieselCommentRepository,
    DieselItemRequestRepository,
> {
    ItemStores {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        items: Arc::new(DieselItemRepository::new(pool.clone())),
        bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        requests: Arc::new(DieselItemRequestRepository::new(pool.clone())),
    }
}

fn memory_stores(
    store: &Arc<InMemoryStore>,
) -> ItemStores<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore> {
    ItemStores {
        users: Arc::clone(store),
        items: Arc::clone(store),
        bookings: Arc::clone(store),
        comments: Arc::clone(store),
        requests: Arc::clone(store),
    }
}

/// Build the shared HTTP state: PostgreSQL repositories when a pool is
/// configured, otherwise a fresh in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => compose(diesel_stores(pool), clock, config.decision_policy),
        None => {
            tracing::warn!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new());
            compose(memory_stores(&store), clock, config.decision_policy)
        }
    };
    web::Data::new(state)
}
