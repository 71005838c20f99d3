//! InvestAI client library.
//!
//! Every call walks the same chain and stops at the first step that answers:
//!
//! ```text
//! server API ──► local snapshot ──► direct provider (own key) ──► sample data
//! ```
//!
//! Portfolio and watchlist calls fall back to the snapshot file; market calls
//! skip it and go to the direct provider when a key is set. Nothing is
//! remembered between calls. Each answer is tagged with its [`DataSource`].

pub mod dashboard;
pub mod direct;
pub mod errors;
pub mod local_store;
pub mod sample;
pub mod server;

#[cfg(test)]
mod dashboard_tests;

pub use dashboard::{DashboardClient, DataSource, Sourced};
pub use direct::{DirectConfig, DirectProvider};
pub use errors::{ClientError, Result};
pub use local_store::{LocalStore, StoredPortfolioItem, StoredWatchlistItem};
pub use server::{HttpServerApi, ServerApi};
