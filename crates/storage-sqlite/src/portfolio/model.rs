//! Database models for portfolio holdings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use investai_core::portfolio::{NewPortfolioItem, PortfolioItem, PortfolioUpdate};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioItemDB {
    pub id: i32,
    pub user_id: String,
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub added_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
pub struct NewPortfolioItemDB {
    pub user_id: String,
    pub symbol: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub added_at: NaiveDateTime,
}

/// Partial update; `None` columns are left alone.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::portfolios)]
pub struct PortfolioChangesDB {
    pub shares: Option<f64>,
    pub avg_cost: Option<f64>,
}

impl From<PortfolioItemDB> for PortfolioItem {
    fn from(db: PortfolioItemDB) -> Self {
        PortfolioItem {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            shares: db.shares,
            avg_cost: db.avg_cost,
            added_at: db.added_at.and_utc(),
        }
    }
}

impl From<NewPortfolioItem> for NewPortfolioItemDB {
    fn from(domain: NewPortfolioItem) -> Self {
        NewPortfolioItemDB {
            user_id: domain.user_id,
            symbol: domain.symbol,
            shares: domain.shares,
            avg_cost: domain.avg_cost,
            added_at: domain.added_at.naive_utc(),
        }
    }
}

impl From<PortfolioUpdate> for PortfolioChangesDB {
    fn from(update: PortfolioUpdate) -> Self {
        PortfolioChangesDB {
            shares: update.shares,
            avg_cost: update.avg_cost,
        }
    }
}
