//! Booking service: creation, owner decisions and listing.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::{info, warn};

use super::ports::{BookingRepository, BookingService, ItemRepository, UserRepository};
use super::rules::{
    ensure_owner, require_available, require_booker_or_owner, require_booking_exists,
    require_item_exists, require_not_owner_booking, require_transition_legal,
    require_user_exists, validate_booking_window,
};
use super::store_errors::map_booking_error;
use super::{
    Booking, BookingDraft, BookingId, BookingQuery, BookingState, BookingStatus, BookingSubject,
    DecisionPolicy, Error, UserId,
};

/// [`BookingService`] over the entity store.
pub struct BookingServiceImpl<U: ?Sized, I: ?Sized, B: ?Sized> {
    users: Arc<U>,
    items: Arc<I>,
    bookings: Arc<B>,
    clock: Arc<dyn Clock>,
    policy: DecisionPolicy,
}

impl<U: ?Sized, I: ?Sized, B: ?Sized> BookingServiceImpl<U, I, B> {
    pub fn new(users: Arc<U>, items: Arc<I>, bookings: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            items,
            bookings,
            clock,
            policy: DecisionPolicy::default(),
        }
    }

    /// Use `policy` for decisions on already-decided bookings.
    #[must_use]
    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<U, I, B> BookingService for BookingServiceImpl<U, I, B>
where
    U: UserRepository + ?Sized,
    I: ItemRepository + ?Sized,
    B: BookingRepository + ?Sized,
{
    async fn create_booking(
        &self,
        booker_id: &UserId,
        draft: BookingDraft,
    ) -> Result<Booking, Error> {
        let now = self.clock.utc();
        require_user_exists(self.users.as_ref(), booker_id).await?;
        let item = require_item_exists(self.items.as_ref(), &draft.item_id).await?;
        require_not_owner_booking(&item, booker_id)?;
        require_available(&item)?;
        let window = validate_booking_window(draft.start, draft.end, now)?;

        let booking = Booking::new(
            BookingId::generate(),
            *item.id(),
            *booker_id,
            window,
            BookingStatus::Waiting,
        );
        self.bookings
            .save(&booking)
            .await
            .map_err(map_booking_error)?;
        info!(booking_id = %booking.id(), item_id = %item.id(), booker_id = %booker_id, "booking created");
        Ok(booking)
    }

    async fn decide_booking(
        &self,
        owner_id: &UserId,
        booking_id: &BookingId,
        approved: bool,
    ) -> Result<Booking, Error> {
        require_user_exists(self.users.as_ref(), owner_id).await?;
        let booking = require_booking_exists(self.bookings.as_ref(), booking_id).await?;
        let item = require_item_exists(self.items.as_ref(), booking.item_id()).await?;
        ensure_owner(&item, owner_id)?;
        let target = require_transition_legal(&booking, approved, self.policy)?;

        let applied = self
            .bookings
            .update_status(booking_id, booking.status(), target)
            .await
            .map_err(map_booking_error)?;
        if !applied {
            warn!(booking_id = %booking_id, %target, "concurrent booking decision lost");
            return Err(Error::invalid_request(format!(
                "booking {booking_id} was decided concurrently"
            )));
        }
        info!(booking_id = %booking_id, status = %target, "booking decided");
        Ok(booking.with_status(target))
    }

    async fn get_booking(
        &self,
        user_id: &UserId,
        booking_id: &BookingId,
    ) -> Result<Booking, Error> {
        require_user_exists(self.users.as_ref(), user_id).await?;
        let booking = require_booking_exists(self.bookings.as_ref(), booking_id).await?;
        let item = require_item_exists(self.items.as_ref(), booking.item_id()).await?;
        require_booker_or_owner(&booking, &item, user_id)?;
        Ok(booking)
    }

    async fn list_bookings(
        &self,
        subject: BookingSubject,
        state: &str,
        page: PageRequest,
    ) -> Result<Vec<Booking>, Error> {
        let state: BookingState = state
            .parse()
            .map_err(|err: super::UnknownStateError| Error::unknown_state(err.to_string()))?;
        require_user_exists(self.users.as_ref(), subject.user_id()).await?;
        let now = self.clock.utc();
        let query = BookingQuery::resolve(subject, state, page, now);
        self.bookings.list(&query).await.map_err(map_booking_error)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
