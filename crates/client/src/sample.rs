//! Bundled sample data, the last step of the fallback chain.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use investai_core::constants::{HISTORY_DAYS, INSIGHT_SYMBOLS};
use investai_core::market::{InsightReport, MarketQuote, Recommendation, Sentiment, SymbolInsight};
use investai_core::portfolio::PortfolioItem;
use investai_core::watchlist::WatchlistItem;
use investai_market_data::{Candle, NewsArticle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStock {
    pub symbol: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub sector: &'static str,
    pub recommendation: Recommendation,
    pub score: u8,
    pub technical_signal: Sentiment,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleHolding {
    pub symbol: &'static str,
    pub shares: f64,
    pub avg_cost: f64,
}

pub const STOCKS: [SampleStock; 5] = [
    SampleStock {
        symbol: "NVDA",
        name: "NVIDIA Corporation",
        price: 181.92,
        change: -1.88,
        change_percent: -0.74,
        sector: "Technology",
        recommendation: Recommendation::Buy,
        score: 94,
        technical_signal: Sentiment::Bullish,
        description: "NVIDIA is the leading manufacturer of graphics processing units (GPUs) and AI hardware.",
    },
    SampleStock {
        symbol: "AMD",
        name: "Advanced Micro Devices",
        price: 215.98,
        change: 1.58,
        change_percent: 0.74,
        sector: "Technology",
        recommendation: Recommendation::Hold,
        score: 65,
        technical_signal: Sentiment::Neutral,
        description: "AMD develops computer processors and related technologies for business and consumer markets.",
    },
    SampleStock {
        symbol: "MSFT",
        name: "Microsoft Corporation",
        price: 477.73,
        change: -12.27,
        change_percent: -2.50,
        sector: "Technology",
        recommendation: Recommendation::Buy,
        score: 88,
        technical_signal: Sentiment::Bullish,
        description: "Microsoft is a global technology leader known for Windows, Office, and Azure cloud services.",
    },
    SampleStock {
        symbol: "TSLA",
        name: "Tesla, Inc.",
        price: 446.74,
        change: 17.50,
        change_percent: 4.08,
        sector: "Consumer Cyclical",
        recommendation: Recommendation::Sell,
        score: 32,
        technical_signal: Sentiment::Bearish,
        description: "Tesla designs and manufactures electric vehicles, battery energy storage, and solar products.",
    },
    SampleStock {
        symbol: "JPM",
        name: "JPMorgan Chase & Co.",
        price: 316.12,
        change: 3.58,
        change_percent: 1.15,
        sector: "Financial Services",
        recommendation: Recommendation::Buy,
        score: 82,
        technical_signal: Sentiment::Bullish,
        description: "JPMorgan Chase is one of the largest financial services firms in the world.",
    },
];

pub const PORTFOLIO_ITEMS: [SampleHolding; 3] = [
    SampleHolding {
        symbol: "NVDA",
        shares: 10.0,
        avg_cost: 120.0,
    },
    SampleHolding {
        symbol: "MSFT",
        shares: 25.0,
        avg_cost: 380.0,
    },
    SampleHolding {
        symbol: "TSLA",
        shares: 50.0,
        avg_cost: 210.0,
    },
];

/// Owner id of sample and locally stored rows.
pub const LOCAL_USER_ID: &str = "local-user";

const SAMPLE_WATCHLIST_LEN: usize = 8;

/// Price the generated history is anchored on for symbols without a sample.
const FALLBACK_BASE_PRICE: f64 = 180.0;

pub fn stock(symbol: &str) -> Option<&'static SampleStock> {
    STOCKS.iter().find(|s| s.symbol.eq_ignore_ascii_case(symbol))
}

/// Provider-shaped `/quote` payload for a sample symbol.
pub fn quote(symbol: &str) -> Option<Value> {
    stock(symbol).map(|s| {
        json!({
            "c": s.price,
            "d": s.change,
            "dp": s.change_percent,
            "pc": s.price - s.change,
        })
    })
}

pub fn overview() -> Vec<MarketQuote> {
    STOCKS
        .iter()
        .map(|s| MarketQuote {
            symbol: s.symbol.to_string(),
            price: s.price,
            change: s.change,
            change_percent: s.change_percent,
            high: None,
            low: None,
            open: None,
            previous_close: Some(s.price - s.change),
        })
        .collect()
}

/// Daily candles ending at `now` with a gentle upward trend.
///
/// Deterministic so repeated calls render the same chart.
pub fn history(symbol: &str, now: DateTime<Utc>) -> Vec<Candle> {
    let end = stock(symbol).map_or(FALLBACK_BASE_PRICE, |s| s.price);
    let days = HISTORY_DAYS;
    let mut previous_close: Option<f64> = None;

    (0..days)
        .map(|i| {
            let progress = i as f64 / (days - 1) as f64;
            let trend = end * (0.85 + 0.15 * progress);
            let wiggle = ((i * 7) % 5 - 2) as f64 * 0.005 * end;
            let close = if i == days - 1 { end } else { trend + wiggle };
            let open = previous_close.unwrap_or(close * 0.99);
            previous_close = Some(close);

            Candle {
                time: (now - Duration::days(days - 1 - i)).timestamp(),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume: (5_000 + (i * 1_733) % 10_000) as f64,
            }
        })
        .collect()
}

/// Insight report over the sample stocks' own ratings.
pub fn insights(now: DateTime<Utc>) -> InsightReport {
    let insights = INSIGHT_SYMBOLS
        .iter()
        .filter_map(|symbol| stock(symbol))
        .map(|s| SymbolInsight {
            symbol: s.symbol.to_string(),
            price: s.price,
            change_percent: s.change_percent,
            signal: s.technical_signal,
            recommendation: s.recommendation,
            score: s.score,
        })
        .collect();
    InsightReport::from_insights(insights, now)
}

/// Sample holdings, newest first, spaced one day apart.
pub fn portfolio(now: DateTime<Utc>) -> Vec<PortfolioItem> {
    PORTFOLIO_ITEMS
        .iter()
        .zip(0i64..)
        .map(|(item, index)| PortfolioItem {
            id: index as i32 + 1,
            user_id: LOCAL_USER_ID.to_string(),
            symbol: item.symbol.to_string(),
            shares: item.shares,
            avg_cost: item.avg_cost,
            added_at: now - Duration::days(index),
        })
        .collect()
}

/// Leading sample symbols, newest first, spaced two hours apart.
pub fn watchlist(now: DateTime<Utc>) -> Vec<WatchlistItem> {
    STOCKS
        .iter()
        .take(SAMPLE_WATCHLIST_LEN)
        .zip(0i64..)
        .map(|(stock, index)| WatchlistItem {
            id: index as i32 + 1,
            user_id: LOCAL_USER_ID.to_string(),
            symbol: stock.symbol.to_string(),
            added_at: now - Duration::hours(2 * index),
        })
        .collect()
}

/// There is no bundled news feed.
pub fn news() -> Vec<NewsArticle> {
    Vec::new()
}
