use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::cache_model::CacheEntry;
use super::cache_traits::CacheStoreTrait;
use crate::errors::{Error, Result};

/// Process-local cache store.
///
/// Used by tests and by the client's direct-provider path, where nothing
/// should outlive the process.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry with an explicit timestamp.
    pub fn insert_entry(&self, entry: CacheEntry) {
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(entry.key.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStoreTrait for MemoryCacheStore {
    fn get_entry(&self, key: &str) -> Result<Option<CacheEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Unexpected("cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put_entry(&self, key: &str, payload: Value) -> Result<CacheEntry> {
        let entry = CacheEntry::new(key, payload, Utc::now());
        self.insert_entry(entry.clone());
        Ok(entry)
    }
}
