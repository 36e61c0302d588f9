//! Shared doubles for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a settable instant.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock starting at a fixed, well-known instant.
    pub fn fixed() -> Self {
        Self::new(reference_instant())
    }

    pub fn advance(&self, delta: Duration) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// 2026-04-01T10:00:00Z.
pub fn reference_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("reference instant"),
    }
}
