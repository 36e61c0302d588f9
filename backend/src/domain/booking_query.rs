//! Booking query resolver.
//!
//! Turns a `(subject, state, page)` request into a [`BookingQuery`] that store
//! adapters execute. Six filters across two subject roles give twelve query
//! shapes; all of them order by `start` descending and page by absolute
//! offset.
//!
//! "Now" is captured by the caller once and frozen inside the filter so every
//! comparison in a single query sees the same instant.

use chrono::{DateTime, Utc};
use pagination::PageRequest;

use super::{Booking, BookingState, BookingStatus, UserId};

/// Whose bookings are being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingSubject {
    /// Bookings the user made.
    Booker(UserId),
    /// Bookings on items the user owns.
    Owner(UserId),
}

impl BookingSubject {
    /// The user identifier behind either role.
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::Booker(id) | Self::Owner(id) => id,
        }
    }
}

/// Concrete predicate a store applies to candidate bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFilter {
    /// Every booking of the subject.
    All,
    /// `start <= now < end`.
    Current { now: DateTime<Utc> },
    /// `end < now`.
    Past { now: DateTime<Utc> },
    /// `start > now`.
    Future { now: DateTime<Utc> },
    /// Exactly the given status.
    Status(BookingStatus),
}

impl BookingFilter {
    /// Resolve a client state against the captured instant.
    pub fn resolve(state: BookingState, now: DateTime<Utc>) -> Self {
        match state {
            BookingState::All => Self::All,
            BookingState::Current => Self::Current { now },
            BookingState::Past => Self::Past { now },
            BookingState::Future => Self::Future { now },
            BookingState::Waiting => Self::Status(BookingStatus::Waiting),
            BookingState::Rejected => Self::Status(BookingStatus::Rejected),
        }
    }

    /// Whether `booking` satisfies the filter.
    pub fn matches(&self, booking: &Booking) -> bool {
        match *self {
            Self::All => true,
            Self::Current { now } => booking.start() <= now && now < booking.end(),
            Self::Past { now } => booking.end() < now,
            Self::Future { now } => booking.start() > now,
            Self::Status(status) => booking.status() == status,
        }
    }
}

/// Fully resolved booking list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingQuery {
    /// Whose bookings: the booker's own or those on the owner's items.
    pub subject: BookingSubject,
    /// Time or status restriction.
    pub filter: BookingFilter,
    /// Window over the `start DESC, id ASC` ordering.
    pub page: PageRequest,
}

impl BookingQuery {
    /// Build the query for `subject` in `state` as of `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use pagination::PageRequest;
    /// use shareit::domain::{BookingFilter, BookingQuery, BookingState, BookingSubject, UserId};
    ///
    /// let now = Utc::now();
    /// let query = BookingQuery::resolve(
    ///     BookingSubject::Owner(UserId::generate()),
    ///     BookingState::Past,
    ///     PageRequest::default(),
    ///     now,
    /// );
    /// assert_eq!(query.filter, BookingFilter::Past { now });
    /// ```
    pub fn resolve(
        subject: BookingSubject,
        state: BookingState,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            filter: BookingFilter::resolve(state, now),
            page,
        }
    }

    /// In-memory evaluation of the query over candidate bookings.
    ///
    /// `owner_of` reports the owner of a booking's item and is only consulted
    /// for [`BookingSubject::Owner`]. Results are sorted by `start`
    /// descending, then windowed by the page.
    pub fn evaluate<'a, I, F>(&self, bookings: I, owner_of: F) -> Vec<Booking>
    where
        I: IntoIterator<Item = &'a Booking>,
        F: Fn(&Booking) -> Option<UserId>,
    {
        let mut selected: Vec<Booking> = bookings
            .into_iter()
            .filter(|booking| match &self.subject {
                BookingSubject::Booker(id) => booking.booker_id() == id,
                BookingSubject::Owner(id) => owner_of(booking).as_ref() == Some(id),
            })
            .filter(|booking| self.filter.matches(booking))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.start().cmp(&a.start()).then_with(|| a.id().cmp(b.id())));
        self.page.apply(selected).collect()
    }
}

#[cfg(test)]
#[path = "booking_query_tests.rs"]
mod tests;
