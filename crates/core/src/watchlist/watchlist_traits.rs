use async_trait::async_trait;

use super::watchlist_model::{NewWatchlistItem, WatchlistInput, WatchlistItem};
use crate::errors::Result;

/// Trait for watchlist repository operations
#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    /// Items for `user_id`, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;
    fn find_for_user(&self, user_id: &str, symbol: &str) -> Result<Option<WatchlistItem>>;
    async fn insert(&self, item: NewWatchlistItem) -> Result<WatchlistItem>;
    async fn delete_for_user(&self, user_id: &str, symbol: &str) -> Result<usize>;
}

/// Trait for watchlist service operations
#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;
    async fn add_symbol(&self, user_id: &str, input: WatchlistInput) -> Result<WatchlistItem>;
    async fn remove_symbol(&self, user_id: &str, symbol: &str) -> Result<()>;
}
