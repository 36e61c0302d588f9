//! Driving port for bookings.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Booking, BookingDraft, BookingId, BookingSubject, Error, UserId};

/// Booking use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Request a booking; it starts out `WAITING`.
    async fn create_booking(&self, booker_id: &UserId, draft: BookingDraft)
    -> Result<Booking, Error>;

    /// Owner approves or rejects a booking.
    async fn decide_booking(
        &self,
        owner_id: &UserId,
        booking_id: &BookingId,
        approved: bool,
    ) -> Result<Booking, Error>;

    /// Fetch a booking visible to its booker or the item owner.
    async fn get_booking(&self, user_id: &UserId, booking_id: &BookingId)
    -> Result<Booking, Error>;

    /// List bookings for a subject filtered by a state name such as
    /// `CURRENT`.
    async fn list_bookings(
        &self,
        subject: BookingSubject,
        state: &str,
        page: PageRequest,
    ) -> Result<Vec<Booking>, Error>;
}
