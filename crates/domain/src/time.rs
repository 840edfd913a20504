//! Timestamps.

use chrono::{DateTime, Utc};

/// UTC timestamp used for location changes and document writes.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
