use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use super::portfolio_model::{NewPortfolioItem, PortfolioInput, PortfolioItem, PortfolioUpdate};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::symbols::normalize_symbol;

pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(repository: Arc<dyn PortfolioRepositoryTrait>) -> Self {
        PortfolioService { repository }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn get_portfolio(&self, user_id: &str) -> Result<Vec<PortfolioItem>> {
        self.repository.list_for_user(user_id)
    }

    async fn add_holding(&self, user_id: &str, input: PortfolioInput) -> Result<PortfolioItem> {
        let symbol = normalize_symbol(&input.symbol)?;
        input.validate()?;

        self.repository
            .insert(NewPortfolioItem {
                user_id: user_id.to_string(),
                symbol,
                shares: input.shares,
                avg_cost: input.avg_cost,
                added_at: Utc::now(),
            })
            .await
    }

    async fn update_holding(
        &self,
        user_id: &str,
        id: i32,
        update: PortfolioUpdate,
    ) -> Result<PortfolioItem> {
        update.validate()?;

        self.repository
            .update_for_user(user_id, id, update)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Portfolio item {} not found", id)))
    }

    /// Removing a missing holding is not an error.
    async fn remove_holding(&self, user_id: &str, id: i32) -> Result<()> {
        let removed = self.repository.delete_for_user(user_id, id).await?;
        if removed == 0 {
            debug!("Portfolio item {} was already gone", id);
        }
        Ok(())
    }
}
