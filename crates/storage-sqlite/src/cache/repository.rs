use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use serde_json::Value;

use investai_core::cache::{CacheEntry, CacheStoreTrait};
use investai_core::Result;

use super::model::CacheEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::api_cache;

pub struct CacheRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CacheRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CacheRepository { pool, writer }
    }
}

#[async_trait]
impl CacheStoreTrait for CacheRepository {
    fn get_entry(&self, key: &str) -> Result<Option<CacheEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let row = api_cache::table
            .find(key)
            .select(CacheEntryDB::as_select())
            .first::<CacheEntryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(CacheEntry::try_from).transpose()?)
    }

    async fn put_entry(&self, key: &str, payload: Value) -> Result<CacheEntry> {
        let entry = CacheEntry::new(key, payload, Utc::now());
        let row = CacheEntryDB::try_from(&entry)?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(api_cache::table)
                    .values(&row)
                    .on_conflict(api_cache::key)
                    .do_update()
                    .set((
                        api_cache::payload.eq(&row.payload),
                        api_cache::cached_at.eq(row.cached_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await?;

        Ok(entry)
    }
}
