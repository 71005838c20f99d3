//! Database models for watchlists.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use investai_core::watchlist::{NewWatchlistItem, WatchlistItem};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::watchlists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatchlistItemDB {
    pub id: i32,
    pub user_id: String,
    pub symbol: String,
    pub added_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlists)]
pub struct NewWatchlistItemDB {
    pub user_id: String,
    pub symbol: String,
    pub added_at: NaiveDateTime,
}

impl From<WatchlistItemDB> for WatchlistItem {
    fn from(db: WatchlistItemDB) -> Self {
        WatchlistItem {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            added_at: db.added_at.and_utc(),
        }
    }
}

impl From<NewWatchlistItem> for NewWatchlistItemDB {
    fn from(domain: NewWatchlistItem) -> Self {
        NewWatchlistItemDB {
            user_id: domain.user_id,
            symbol: domain.symbol,
            added_at: domain.added_at.naive_utc(),
        }
    }
}
