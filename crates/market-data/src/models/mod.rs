//! Typed read-only views over provider payloads.
//!
//! - `quote` - latest quote (`/quote`)
//! - `candle` - daily candle arrays (`/stock/candle`)
//! - `news` - market news articles (`/news`)
//!
//! Payloads are cached as raw JSON; these views are applied after a cache read.

mod candle;
mod news;
mod quote;

pub use candle::{Candle, CandleSeries};
pub use news::NewsArticle;
pub use quote::QuoteSnapshot;
