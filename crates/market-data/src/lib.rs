//! InvestAI Market Data Crate
//!
//! Thin, credentialed access to the upstream market data provider (Finnhub).
//!
//! # Overview
//!
//! - [`MarketDataProvider`] is the seam the rest of the workspace programs
//!   against: a JSON GET against a provider endpoint.
//! - [`FinnhubProvider`] is the production implementation.
//! - [`models`] holds typed read-only views over the provider payloads
//!   (quotes, daily candles, news). Payloads travel through the cache as
//!   opaque JSON; these views are only applied at the edges.
//!
//! ```text
//! +-----------------+      +------------------+      +-----------+
//! |  QuoteFetcher   | ---> | MarketDataProvider| ---> |  Finnhub  |
//! |  (core crate)   |      |  (this crate)    |      |  REST API |
//! +-----------------+      +------------------+      +-----------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{Candle, CandleSeries, NewsArticle, QuoteSnapshot};
pub use provider::finnhub::{FinnhubProvider, DEFAULT_BASE_URL};
pub use provider::MarketDataProvider;
