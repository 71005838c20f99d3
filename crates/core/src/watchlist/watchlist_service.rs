use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::watchlist_model::{NewWatchlistItem, WatchlistInput, WatchlistItem};
use super::watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::symbols::normalize_symbol;

pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
}

impl WatchlistService {
    pub fn new(repository: Arc<dyn WatchlistRepositoryTrait>) -> Self {
        WatchlistService { repository }
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        self.repository.list_for_user(user_id)
    }

    /// Watching an already watched symbol returns the existing row.
    async fn add_symbol(&self, user_id: &str, input: WatchlistInput) -> Result<WatchlistItem> {
        let symbol = normalize_symbol(&input.symbol)?;

        if let Some(existing) = self.repository.find_for_user(user_id, &symbol)? {
            return Ok(existing);
        }

        let inserted = self
            .repository
            .insert(NewWatchlistItem {
                user_id: user_id.to_string(),
                symbol: symbol.clone(),
                added_at: Utc::now(),
            })
            .await;

        match inserted {
            // Lost a race with a concurrent add of the same symbol
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => self
                .repository
                .find_for_user(user_id, &symbol)?
                .ok_or_else(|| Error::NotFound(format!("Watchlist entry {}", symbol))),
            other => other,
        }
    }

    async fn remove_symbol(&self, user_id: &str, symbol: &str) -> Result<()> {
        let symbol = symbol.trim().to_uppercase();
        self.repository.delete_for_user(user_id, &symbol).await?;
        Ok(())
    }
}
