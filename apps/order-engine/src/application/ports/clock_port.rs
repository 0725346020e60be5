//! Clock Port (Driven Port)

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait ClockPort: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}
