//! Clock port used to stamp newly created redirects.

use chrono::{DateTime, Utc};

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
