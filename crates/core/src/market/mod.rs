//! Market views built on top of the cached provider payloads.

mod market_model;
mod market_service;


pub use market_model::{
    InsightReport, MarketQuote, Recommendation, Sentiment, SymbolInsight,
};
pub use market_service::MarketService;
