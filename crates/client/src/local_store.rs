//! Local persisted snapshot of the portfolio and watchlist.
//!
//! Each list lives in its own JSON file. Rows keep `addedAt` as an RFC 3339
//! string on disk and are converted to typed timestamps on every read. A
//! missing or unreadable file reads as the sample seed; the seed is only
//! written once something is mutated. [`LocalStore::saved_portfolio`] and
//! [`LocalStore::saved_watchlist`] tell a real snapshot apart from the seed.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use investai_core::portfolio::{PortfolioInput, PortfolioItem, PortfolioUpdate};
use investai_core::utils::symbols::normalize_symbol;
use investai_core::watchlist::WatchlistItem;

use crate::errors::Result;
use crate::sample::{self, LOCAL_USER_ID};

const PORTFOLIO_FILE: &str = "investai_portfolio.json";
const WATCHLIST_FILE: &str = "investai_watchlist.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPortfolioItem {
    pub id: i32,
    pub user_id: String,
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub added_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredWatchlistItem {
    pub id: i32,
    pub user_id: String,
    pub symbol: String,
    pub added_at: String,
}

impl StoredPortfolioItem {
    fn normalize(&self) -> Result<PortfolioItem> {
        Ok(PortfolioItem {
            id: self.id,
            user_id: self.user_id.clone(),
            symbol: self.symbol.clone(),
            shares: self.shares,
            avg_cost: self.avg_cost,
            added_at: parse_timestamp(&self.added_at)?,
        })
    }
}

impl StoredWatchlistItem {
    fn normalize(&self) -> Result<WatchlistItem> {
        Ok(WatchlistItem {
            id: self.id,
            user_id: self.user_id.clone(),
            symbol: self.symbol.clone(),
            added_at: parse_timestamp(&self.added_at)?,
        })
    }
}

impl From<&PortfolioItem> for StoredPortfolioItem {
    fn from(item: &PortfolioItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id.clone(),
            symbol: item.symbol.clone(),
            shares: item.shares,
            avg_cost: item.avg_cost,
            added_at: format_timestamp(item.added_at),
        }
    }
}

impl From<&WatchlistItem> for StoredWatchlistItem {
    fn from(item: &WatchlistItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id.clone(),
            symbol: item.symbol.clone(),
            added_at: format_timestamp(item.added_at),
        }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).map_err(investai_core::Error::from)?;
    Ok(parsed.with_timezone(&Utc))
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

fn seed_portfolio(now: DateTime<Utc>) -> Vec<StoredPortfolioItem> {
    sample::portfolio(now)
        .iter()
        .map(StoredPortfolioItem::from)
        .collect()
}

fn seed_watchlist(now: DateTime<Utc>) -> Vec<StoredWatchlistItem> {
    sample::watchlist(now)
        .iter()
        .map(StoredWatchlistItem::from)
        .collect()
}

/// File-backed store used while the server is unreachable.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Rows from `file`, or `None` when it is missing or unreadable.
    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Option<Vec<T>>> {
        let path = self.dir.join(file);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(rows) => Ok(Some(rows)),
            Err(e) => {
                warn!("Ignoring unreadable snapshot {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_vec_pretty(rows)?;
        fs::write(self.dir.join(file), body)?;
        Ok(())
    }

    fn load_portfolio(&self) -> Result<Vec<StoredPortfolioItem>> {
        Ok(self
            .load(PORTFOLIO_FILE)?
            .unwrap_or_else(|| seed_portfolio(Utc::now())))
    }

    fn load_watchlist(&self) -> Result<Vec<StoredWatchlistItem>> {
        Ok(self
            .load(WATCHLIST_FILE)?
            .unwrap_or_else(|| seed_watchlist(Utc::now())))
    }

    /// Replace the stored portfolio rows as-is.
    pub fn write_portfolio(&self, rows: &[StoredPortfolioItem]) -> Result<()> {
        self.save(PORTFOLIO_FILE, rows)
    }

    /// Replace the stored watchlist rows as-is.
    pub fn write_watchlist(&self, rows: &[StoredWatchlistItem]) -> Result<()> {
        self.save(WATCHLIST_FILE, rows)
    }

    pub fn portfolio(&self) -> Result<Vec<PortfolioItem>> {
        self.load_portfolio()?
            .iter()
            .map(StoredPortfolioItem::normalize)
            .collect()
    }

    /// Persisted portfolio rows; `None` until a snapshot has been written.
    pub fn saved_portfolio(&self) -> Result<Option<Vec<PortfolioItem>>> {
        self.load::<StoredPortfolioItem>(PORTFOLIO_FILE)?
            .map(|rows| rows.iter().map(StoredPortfolioItem::normalize).collect())
            .transpose()
    }

    pub fn add_portfolio(&self, input: PortfolioInput) -> Result<PortfolioItem> {
        input.validate()?;
        let symbol = normalize_symbol(&input.symbol)?;
        let mut rows = self.load_portfolio()?;

        let created = StoredPortfolioItem {
            id: next_id(rows.iter().map(|r| r.id)),
            user_id: LOCAL_USER_ID.to_string(),
            symbol,
            shares: input.shares,
            avg_cost: input.avg_cost,
            added_at: format_timestamp(Utc::now()),
        };
        rows.insert(0, created.clone());
        self.save(PORTFOLIO_FILE, &rows)?;
        created.normalize()
    }

    /// Merge `update` into the row with `id`. `None` when no such row exists.
    pub fn update_portfolio(&self, id: i32, update: PortfolioUpdate) -> Result<Option<PortfolioItem>> {
        update.validate()?;
        let mut rows = self.load_portfolio()?;

        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let mut updated = row.normalize()?;
        update.apply_to(&mut updated);
        *row = StoredPortfolioItem::from(&updated);

        self.save(PORTFOLIO_FILE, &rows)?;
        Ok(Some(updated))
    }

    pub fn remove_portfolio(&self, id: i32) -> Result<()> {
        let mut rows = self.load_portfolio()?;
        rows.retain(|r| r.id != id);
        self.save(PORTFOLIO_FILE, &rows)
    }

    pub fn watchlist(&self) -> Result<Vec<WatchlistItem>> {
        self.load_watchlist()?
            .iter()
            .map(StoredWatchlistItem::normalize)
            .collect()
    }

    /// Persisted watchlist rows; `None` until a snapshot has been written.
    pub fn saved_watchlist(&self) -> Result<Option<Vec<WatchlistItem>>> {
        self.load::<StoredWatchlistItem>(WATCHLIST_FILE)?
            .map(|rows| rows.iter().map(StoredWatchlistItem::normalize).collect())
            .transpose()
    }

    /// Watch `symbol`; an already watched symbol returns its existing row.
    pub fn add_watchlist(&self, symbol: &str) -> Result<WatchlistItem> {
        let symbol = normalize_symbol(symbol)?;
        let mut rows = self.load_watchlist()?;

        if let Some(existing) = rows.iter().find(|r| r.symbol == symbol) {
            return existing.normalize();
        }

        let created = StoredWatchlistItem {
            id: next_id(rows.iter().map(|r| r.id)),
            user_id: LOCAL_USER_ID.to_string(),
            symbol,
            added_at: format_timestamp(Utc::now()),
        };
        rows.insert(0, created.clone());
        self.save(WATCHLIST_FILE, &rows)?;
        created.normalize()
    }

    pub fn remove_watchlist(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.trim().to_uppercase();
        let mut rows = self.load_watchlist()?;
        rows.retain(|r| r.symbol != symbol);
        self.save(WATCHLIST_FILE, &rows)
    }
}
