//! System clock adapter.

use chrono::{DateTime, Utc};

use crate::ports::Clock;

/// Reads the wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
