use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use investai_core::watchlist::{NewWatchlistItem, WatchlistItem, WatchlistRepositoryTrait};
use investai_core::Result;

use super::model::{NewWatchlistItemDB, WatchlistItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::watchlists;

pub struct WatchlistRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WatchlistRepository { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = watchlists::table
            .filter(watchlists::user_id.eq(user_id))
            .order((watchlists::added_at.desc(), watchlists::id.desc()))
            .select(WatchlistItemDB::as_select())
            .load::<WatchlistItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(WatchlistItem::from).collect())
    }

    fn find_for_user(&self, user_id: &str, symbol: &str) -> Result<Option<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;
        let row = watchlists::table
            .filter(watchlists::user_id.eq(user_id))
            .filter(watchlists::symbol.eq(symbol))
            .select(WatchlistItemDB::as_select())
            .first::<WatchlistItemDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(WatchlistItem::from))
    }

    async fn insert(&self, item: NewWatchlistItem) -> Result<WatchlistItem> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WatchlistItem> {
                let created = diesel::insert_into(watchlists::table)
                    .values(NewWatchlistItemDB::from(item))
                    .returning(WatchlistItemDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(WatchlistItem::from(created))
            })
            .await
    }

    async fn delete_for_user(&self, user_id: &str, symbol: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let symbol = symbol.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    watchlists::table
                        .filter(watchlists::user_id.eq(user_id))
                        .filter(watchlists::symbol.eq(symbol)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
