use async_trait::async_trait;

use super::portfolio_model::{NewPortfolioItem, PortfolioInput, PortfolioItem, PortfolioUpdate};
use crate::errors::Result;

/// Trait for portfolio repository operations
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Holdings for `user_id`, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<PortfolioItem>>;
    async fn insert(&self, item: NewPortfolioItem) -> Result<PortfolioItem>;
    /// Returns `None` when no row with `id` belongs to `user_id`.
    async fn update_for_user(
        &self,
        user_id: &str,
        id: i32,
        update: PortfolioUpdate,
    ) -> Result<Option<PortfolioItem>>;
    async fn delete_for_user(&self, user_id: &str, id: i32) -> Result<usize>;
}

/// Trait for portfolio service operations
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn get_portfolio(&self, user_id: &str) -> Result<Vec<PortfolioItem>>;
    async fn add_holding(&self, user_id: &str, input: PortfolioInput) -> Result<PortfolioItem>;
    async fn update_holding(
        &self,
        user_id: &str,
        id: i32,
        update: PortfolioUpdate,
    ) -> Result<PortfolioItem>;
    async fn remove_holding(&self, user_id: &str, id: i32) -> Result<()>;
}
