//! InvestAI Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the dashboard backend.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod assistant;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod market;
pub mod portfolio;
pub mod quotes;
pub mod rate_limit;
pub mod users;
pub mod utils;
pub mod watchlist;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
