//! Validation and rules engine.
//!
//! Stateless guard functions, one per domain rule. Existence guards read
//! through the repository they are handed and return the loaded entity so
//! callers need not fetch it twice. Every other guard is a pure check.
//!
//! Ownership violations surface as `not_found`: a caller who does not own an
//! item or booking is not told that it exists.

use chrono::{DateTime, Utc};

use super::ports::{BookingRepository, ItemRepository, ItemRequestRepository, UserRepository};
use super::store_errors::{
    map_booking_error, map_item_error, map_item_request_error, map_user_error,
};
use super::{
    Booking, BookingId, BookingStatus, BookingValidationError, BookingWindow, DecisionPolicy,
    Error, Item, ItemId, ItemRequest, ItemRequestId, User, UserId,
};

/// Load a user or fail with `not_found`.
pub async fn require_user_exists<R>(users: &R, id: &UserId) -> Result<User, Error>
where
    R: UserRepository + ?Sized,
{
    users
        .find_by_id(id)
        .await
        .map_err(map_user_error)?
        .ok_or_else(|| Error::not_found(format!("user {id} not found")))
}

/// Load an item or fail with `not_found`.
pub async fn require_item_exists<R>(items: &R, id: &ItemId) -> Result<Item, Error>
where
    R: ItemRepository + ?Sized,
{
    items
        .find_by_id(id)
        .await
        .map_err(map_item_error)?
        .ok_or_else(|| Error::not_found(format!("item {id} not found")))
}

/// Load a booking or fail with `not_found`.
pub async fn require_booking_exists<R>(bookings: &R, id: &BookingId) -> Result<Booking, Error>
where
    R: BookingRepository + ?Sized,
{
    bookings
        .find_by_id(id)
        .await
        .map_err(map_booking_error)?
        .ok_or_else(|| Error::not_found(format!("booking {id} not found")))
}

/// Load an item request or fail with `not_found`.
pub async fn require_request_exists<R>(
    requests: &R,
    id: &ItemRequestId,
) -> Result<ItemRequest, Error>
where
    R: ItemRequestRepository + ?Sized,
{
    requests
        .find_by_id(id)
        .await
        .map_err(map_item_request_error)?
        .ok_or_else(|| Error::not_found(format!("item request {id} not found")))
}

/// Load an item and check that `user_id` owns it.
pub async fn require_owner<R>(items: &R, user_id: &UserId, item_id: &ItemId) -> Result<Item, Error>
where
    R: ItemRepository + ?Sized,
{
    let item = require_item_exists(items, item_id).await?;
    ensure_owner(&item, user_id)?;
    Ok(item)
}

/// Pure ownership check on an already loaded item.
pub fn ensure_owner(item: &Item, user_id: &UserId) -> Result<(), Error> {
    if item.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(Error::not_found(format!(
            "item {} not found for user {user_id}",
            item.id()
        )))
    }
}

/// Check a requested window against `now`.
///
/// Failures are checked in order: missing start or end, empty window, end
/// before start, start in the past. `start == now` is accepted; the end needs
/// no separate check against `now` because `end > start >= now`.
pub fn validate_booking_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<BookingWindow, Error> {
    check_window(start, end, now).map_err(|err| Error::invalid_request(err.to_string()))
}

fn check_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<BookingWindow, BookingValidationError> {
    let start = start.ok_or(BookingValidationError::MissingStart)?;
    let end = end.ok_or(BookingValidationError::MissingEnd)?;
    let window = BookingWindow::new(start, end)?;
    if start < now {
        return Err(BookingValidationError::StartInPast);
    }
    Ok(window)
}

/// Fail when the item is not open for booking.
pub fn require_available(item: &Item) -> Result<(), Error> {
    if item.available() {
        Ok(())
    } else {
        Err(Error::invalid_request(format!(
            "item {} is not available for booking",
            item.id()
        )))
    }
}

/// Owners cannot book their own items.
pub fn require_not_owner_booking(item: &Item, requester_id: &UserId) -> Result<(), Error> {
    if item.is_owned_by(requester_id) {
        Err(Error::not_found(format!(
            "item {} cannot be booked by its owner",
            item.id()
        )))
    } else {
        Ok(())
    }
}

/// Only the booker and the item owner may see a booking.
pub fn require_booker_or_owner(
    booking: &Booking,
    item: &Item,
    user_id: &UserId,
) -> Result<(), Error> {
    if booking.booker_id() == user_id || item.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(Error::not_found(format!("booking {} not found", booking.id())))
    }
}

/// Decide the status an owner decision moves the booking to.
///
/// Repeating the booking's current decision is always rejected, as is any
/// decision on a `CANCELED` booking. Under [`DecisionPolicy::Strict`] only
/// `WAITING` bookings are decidable; [`DecisionPolicy::AllowReversal`] also
/// lets an owner flip `APPROVED` and `REJECTED`.
///
/// # Examples
/// ```
/// use shareit::domain::{BookingStatus, DecisionPolicy};
/// use shareit::domain::rules::transition_target;
///
/// let target = transition_target(BookingStatus::Waiting, true, DecisionPolicy::Strict);
/// assert_eq!(target.ok(), Some(BookingStatus::Approved));
/// ```
pub fn transition_target(
    current: BookingStatus,
    approved: bool,
    policy: DecisionPolicy,
) -> Result<BookingStatus, Error> {
    let target = BookingStatus::decided(approved);
    let legal = match (current, policy) {
        (BookingStatus::Waiting, _) => true,
        (BookingStatus::Canceled, _) => false,
        (_, DecisionPolicy::Strict) => false,
        (decided, DecisionPolicy::AllowReversal) => decided != target,
    };
    if legal {
        Ok(target)
    } else {
        Err(Error::invalid_request(format!(
            "booking is already {current} and cannot become {target}"
        )))
    }
}

/// Booking-level wrapper over [`transition_target`].
pub fn require_transition_legal(
    booking: &Booking,
    approved: bool,
    policy: DecisionPolicy,
) -> Result<BookingStatus, Error> {
    transition_target(booking.status(), approved, policy)
}

/// Whether any booking is approved and already started at `now`.
pub fn has_rented(bookings: &[Booking], now: DateTime<Utc>) -> bool {
    bookings
        .iter()
        .any(|b| b.status() == BookingStatus::Approved && b.start() < now)
}

/// Fail unless `booker_id` has an approved, started booking of `item_id`.
pub async fn require_comment_eligibility<R>(
    bookings: &R,
    booker_id: &UserId,
    item_id: &ItemId,
    now: DateTime<Utc>,
) -> Result<(), Error>
where
    R: BookingRepository + ?Sized,
{
    let history = bookings
        .list_by_booker_and_item(booker_id, item_id)
        .await
        .map_err(map_booking_error)?;
    if has_rented(&history, now) {
        Ok(())
    } else {
        Err(Error::invalid_request(format!(
            "user {booker_id} has not rented item {item_id}"
        )))
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
