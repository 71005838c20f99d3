//! Database models for the API response cache.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use investai_core::cache::CacheEntry;

use crate::errors::StorageError;

/// Database model for a cache row. The payload is stored as JSON text.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::api_cache)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CacheEntryDB {
    pub key: String,
    pub payload: String,
    pub cached_at: NaiveDateTime,
}

impl TryFrom<CacheEntryDB> for CacheEntry {
    type Error = StorageError;

    fn try_from(db: CacheEntryDB) -> Result<Self, Self::Error> {
        Ok(CacheEntry {
            key: db.key,
            payload: serde_json::from_str(&db.payload)?,
            cached_at: db.cached_at.and_utc(),
        })
    }
}

impl TryFrom<&CacheEntry> for CacheEntryDB {
    type Error = StorageError;

    fn try_from(entry: &CacheEntry) -> Result<Self, Self::Error> {
        Ok(CacheEntryDB {
            key: entry.key.clone(),
            payload: serde_json::to_string(&entry.payload)?,
            cached_at: entry.cached_at.naive_utc(),
        })
    }
}
