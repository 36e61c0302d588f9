//! Port for booking persistence and the resolved booking list queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Booking, BookingId, BookingQuery, BookingStatus, ItemId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

/// Store of bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    async fn save(&self, booking: &Booking) -> Result<(), BookingPersistenceError>;

    /// Fetch a booking by identifier.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingPersistenceError>;

    /// Execute a resolved list query: subject and filter applied, ordered by
    /// `start` descending, windowed by the page.
    async fn list(&self, query: &BookingQuery) -> Result<Vec<Booking>, BookingPersistenceError>;

    /// Latest booking of the item that started before `now`.
    async fn find_last(
        &self,
        item_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingPersistenceError>;

    /// Earliest approved booking of the item starting after `now`.
    async fn find_next(
        &self,
        item_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingPersistenceError>;

    /// Every booking `booker_id` made for `item_id`.
    async fn list_by_booker_and_item(
        &self,
        booker_id: &UserId,
        item_id: &ItemId,
    ) -> Result<Vec<Booking>, BookingPersistenceError>;

    /// Set the status to `new` only if it is still `expected`.
    ///
    /// Returns `false` when the stored status differed, meaning a concurrent
    /// decision won.
    async fn update_status(
        &self,
        id: &BookingId,
        expected: BookingStatus,
        new: BookingStatus,
    ) -> Result<bool, BookingPersistenceError>;
}
