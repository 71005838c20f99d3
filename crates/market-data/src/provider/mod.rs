//! Market data provider abstraction and the Finnhub implementation.
//!
//! Providers are deliberately dumb: they perform one credentialed GET and hand
//! back the decoded JSON. Caching, rate limiting and fallback live in the
//! layers above.

mod traits;

pub mod finnhub;

pub use traits::MarketDataProvider;
