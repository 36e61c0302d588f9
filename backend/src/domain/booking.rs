//! Booking data model, status lifecycle and state filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ItemId, UserId};

/// Stored lifecycle status of a booking.
///
/// ```text
/// WAITING -> APPROVED
///         -> REJECTED
/// ```
/// `CANCELED` is representable but never produced or decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
}

impl BookingStatus {
    /// Canonical upper-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Status reached by an owner decision.
    pub const fn decided(approved: bool) -> Self {
        if approved {
            Self::Approved
        } else {
            Self::Rejected
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`BookingStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct ParseBookingStatusError(pub String);

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(ParseBookingStatusError(other.to_owned())),
        }
    }
}

/// Client-facing filter applied to booking lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

/// Error for a state filter outside the closed set.
///
/// # Examples
/// ```
/// use shareit::domain::BookingState;
///
/// let err = "BOGUS".parse::<BookingState>().expect_err("unknown");
/// assert_eq!(err.to_string(), "Unknown state: BOGUS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown state: {0}")]
pub struct UnknownStateError(pub String);

impl FromStr for BookingState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(UnknownStateError(other.to_owned())),
        }
    }
}

/// How owner decisions on already-decided bookings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecisionPolicy {
    /// Only `WAITING` bookings may be decided.
    #[default]
    Strict,
    /// A decided booking may be flipped to the opposite outcome; repeating
    /// the same outcome is still rejected.
    AllowReversal,
}

/// Error returned when parsing an unknown [`DecisionPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown decision policy `{0}`, expected `strict` or `allow-reversal`")]
pub struct ParseDecisionPolicyError(pub String);

impl FromStr for DecisionPolicy {
    type Err = ParseDecisionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "allow-reversal" | "allow_reversal" => Ok(Self::AllowReversal),
            other => Err(ParseDecisionPolicyError(other.to_owned())),
        }
    }
}

/// Validation errors for a requested booking window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("booking start must be provided")]
    MissingStart,
    #[error("booking end must be provided")]
    MissingEnd,
    #[error("booking start and end must differ")]
    EmptyWindow,
    #[error("booking end must be after its start")]
    EndBeforeStart,
    #[error("booking start must not be in the past")]
    StartInPast,
}

/// Half-open booking interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingWindow {
    /// Build a window, enforcing `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingValidationError> {
        if start == end {
            return Err(BookingValidationError::EmptyWindow);
        }
        if end < start {
            return Err(BookingValidationError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Booker-supplied fields of a new booking. Timestamps may be absent so the
/// rules engine can report which one is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub item_id: ItemId,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// A reservation of an item by a user.
///
/// Immutable after creation except for `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    item_id: ItemId,
    booker_id: UserId,
    window: BookingWindow,
    status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: BookingId,
        item_id: ItemId,
        booker_id: UserId,
        window: BookingWindow,
        status: BookingStatus,
    ) -> Self {
        Self {
            id,
            item_id,
            booker_id,
            window,
            status,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn booker_id(&self) -> &UserId {
        &self.booker_id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.window.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.window.end()
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Copy of this booking carrying `status`.
    #[must_use]
    pub fn with_status(&self, status: BookingStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Reduced projection of a booking shown on an owner's item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRef {
    pub id: BookingId,
    pub booker_id: UserId,
}

impl From<&Booking> for BookingRef {
    fn from(value: &Booking) -> Self {
        Self {
            id: value.id,
            booker_id: value.booker_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ALL", BookingState::All)]
    #[case("CURRENT", BookingState::Current)]
    #[case("PAST", BookingState::Past)]
    #[case("FUTURE", BookingState::Future)]
    #[case("WAITING", BookingState::Waiting)]
    #[case("REJECTED", BookingState::Rejected)]
    fn parses_known_states(#[case] raw: &str, #[case] expected: BookingState) {
        assert_eq!(raw.parse::<BookingState>().expect("known state"), expected);
    }

    #[rstest]
    #[case("BOGUS")]
    #[case("all")]
    #[case("APPROVED")]
    #[case("")]
    fn rejects_other_states(#[case] raw: &str) {
        let err = raw.parse::<BookingState>().expect_err("unknown state");
        assert_eq!(err.to_string(), format!("Unknown state: {raw}"));
    }

    #[rstest]
    #[case("strict", DecisionPolicy::Strict)]
    #[case("allow-reversal", DecisionPolicy::AllowReversal)]
    #[case(" Allow_Reversal ", DecisionPolicy::AllowReversal)]
    fn parses_decision_policy(#[case] raw: &str, #[case] expected: DecisionPolicy) {
        assert_eq!(raw.parse::<DecisionPolicy>().expect("policy"), expected);
    }

    #[rstest]
    fn status_round_trips_through_its_name() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
    }

    #[rstest]
    fn window_requires_start_before_end() {
        let now = Utc::now();
        assert_eq!(
            BookingWindow::new(now, now),
            Err(BookingValidationError::EmptyWindow)
        );
        assert_eq!(
            BookingWindow::new(now, now - Duration::hours(1)),
            Err(BookingValidationError::EndBeforeStart)
        );
        assert!(BookingWindow::new(now, now + Duration::hours(1)).is_ok());
    }
}
