use std::sync::Arc;

use chrono::{Duration, Utc};
use log::debug;
use serde_json::Value;

use super::cache_model::CacheEntry;
use super::cache_traits::CacheStoreTrait;
use crate::errors::Result;

/// Freshness-aware access to a [`CacheStoreTrait`].
#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn CacheStoreTrait>,
}

impl CacheService {
    pub fn new(store: Arc<dyn CacheStoreTrait>) -> Self {
        Self { store }
    }

    /// Payload for `key` if it was written less than `max_age_minutes` ago.
    ///
    /// A stale row is reported as a miss; the row itself stays in place.
    pub fn get(&self, key: &str, max_age_minutes: i64) -> Result<Option<Value>> {
        let entry = self.store.get_entry(key)?;
        Ok(entry.and_then(|entry| {
            if entry.is_fresh(Utc::now(), Duration::minutes(max_age_minutes)) {
                Some(entry.payload)
            } else {
                debug!("Cache entry '{}' is stale (cached at {})", key, entry.cached_at);
                None
            }
        }))
    }

    pub async fn put(&self, key: &str, payload: Value) -> Result<CacheEntry> {
        self.store.put_entry(key, payload).await
    }
}
