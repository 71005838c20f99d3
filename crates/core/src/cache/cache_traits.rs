use async_trait::async_trait;
use serde_json::Value;

use super::cache_model::CacheEntry;
use crate::errors::Result;

/// Key-value store for provider payloads.
#[async_trait]
pub trait CacheStoreTrait: Send + Sync {
    /// Load the entry for `key`, fresh or not.
    fn get_entry(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Insert or atomically replace the entry for `key`, stamping it with now.
    async fn put_entry(&self, key: &str, payload: Value) -> Result<CacheEntry>;
}
