//! Watchlist domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a watched symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: i32,
    pub user_id: String,
    pub symbol: String,
    pub added_at: DateTime<Utc>,
}

/// Input model for watching a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistInput {
    pub symbol: String,
}

/// Row to insert; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewWatchlistItem {
    pub user_id: String,
    pub symbol: String,
    pub added_at: DateTime<Utc>,
}
