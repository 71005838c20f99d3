//! Portfolio domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, Result, ValidationError};

/// Domain model representing one holding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: i32,
    pub user_id: String,
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub added_at: DateTime<Utc>,
}

/// Input model for adding a holding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInput {
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
}

/// Partial update of a holding. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cost: Option<f64>,
}

/// Row to insert; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewPortfolioItem {
    pub user_id: String,
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub added_at: DateTime<Utc>,
}

fn check_shares(shares: f64, errors: &mut Vec<FieldError>) {
    if !shares.is_finite() || shares <= 0.0 {
        errors.push(FieldError::new("shares", "must be a number greater than 0"));
    }
}

fn check_avg_cost(avg_cost: f64, errors: &mut Vec<FieldError>) {
    if !avg_cost.is_finite() || avg_cost < 0.0 {
        errors.push(FieldError::new("avgCost", "must be a number of at least 0"));
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(errors).into())
    }
}

impl PortfolioInput {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        check_shares(self.shares, &mut errors);
        check_avg_cost(self.avg_cost, &mut errors);
        into_result(errors)
    }
}

impl PortfolioUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if let Some(shares) = self.shares {
            check_shares(shares, &mut errors);
        }
        if let Some(avg_cost) = self.avg_cost {
            check_avg_cost(avg_cost, &mut errors);
        }
        into_result(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_none() && self.avg_cost.is_none()
    }

    pub fn apply_to(&self, item: &mut PortfolioItem) {
        if let Some(shares) = self.shares {
            item.shares = shares;
        }
        if let Some(avg_cost) = self.avg_cost {
            item.avg_cost = avg_cost;
        }
    }
}
