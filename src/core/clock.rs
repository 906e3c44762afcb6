//! Time source for deck ids and creation timestamps.
//!
//! Production code uses `SystemClock`. Tests use `FixedClock` so minted ids
//! and timestamps are reproducible.

use std::cell::Cell;

/// Millisecond wall clock.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually driven clock.
///
/// ```
/// use gwent_companion::core::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_000);
/// assert_eq!(clock.now_millis(), 1_000);
/// clock.advance(5);
/// assert_eq!(clock.now_millis(), 1_005);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
