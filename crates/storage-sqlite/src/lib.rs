//! SQLite storage implementation for InvestAI.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `investai-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Diesel migrations
//! - Repository implementations for users, sessions, watchlists, portfolios and the API cache
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod cache;
pub mod portfolio;
pub mod users;
pub mod watchlist;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use cache::CacheRepository;
pub use portfolio::PortfolioRepository;
pub use users::{SessionRepository, UserRepository};
pub use watchlist::WatchlistRepository;

// Re-export from investai-core for convenience
pub use investai_core::errors::{DatabaseError, Error, Result};
