//! Cache domain model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cached provider payload.
///
/// At most one entry exists per key. Entries are overwritten on each
/// successful fetch and never deleted; staleness is judged at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: String,
    pub payload: Value,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>, payload: Value, cached_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            payload,
            cached_at,
        }
    }

    /// Fresh while `now - cached_at` is strictly below `max_age`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.cached_at) < max_age
    }
}
