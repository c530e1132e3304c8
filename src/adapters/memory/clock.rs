//! Clock frozen at a single instant.

use chrono::{DateTime, Utc};

use crate::ports::Clock;

/// Always returns the instant it was built with.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes time at `instant`.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
