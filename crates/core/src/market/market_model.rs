//! Market view models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use investai_market_data::QuoteSnapshot;

/// Quote row of the market overview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
}

impl MarketQuote {
    pub fn from_snapshot(symbol: &str, quote: &QuoteSnapshot) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: quote.current,
            change: quote.change.unwrap_or(0.0),
            change_percent: quote.change_percent(),
            high: quote.high,
            low: quote.low,
            open: quote.open,
            previous_close: quote.previous_close,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

/// A move of at least one percent either way is a signal.
const SIGNAL_THRESHOLD: f64 = 1.0;

impl Sentiment {
    pub fn from_change_percent(dp: f64) -> Self {
        if dp >= SIGNAL_THRESHOLD {
            Sentiment::Bullish
        } else if dp <= -SIGNAL_THRESHOLD {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    pub fn recommendation(self) -> Recommendation {
        match self {
            Sentiment::Bullish => Recommendation::Buy,
            Sentiment::Bearish => Recommendation::Sell,
            Sentiment::Neutral => Recommendation::Hold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// Heuristic read of one symbol's daily move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInsight {
    pub symbol: String,
    pub price: f64,
    pub change_percent: f64,
    pub signal: Sentiment,
    pub recommendation: Recommendation,
    /// Confidence from 0 to 100
    pub score: u8,
}

impl SymbolInsight {
    pub fn from_snapshot(symbol: &str, quote: &QuoteSnapshot) -> Self {
        let dp = quote.change_percent();
        let signal = Sentiment::from_change_percent(dp);
        Self {
            symbol: symbol.to_string(),
            price: quote.current,
            change_percent: dp,
            signal,
            recommendation: signal.recommendation(),
            score: confidence_score(dp),
        }
    }
}

/// `clamp(50 + 10 * dp, 0, 100)`, rounded.
pub(crate) fn confidence_score(dp: f64) -> u8 {
    (50.0 + 10.0 * dp).clamp(0.0, 100.0).round() as u8
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub sentiment: Sentiment,
    pub average_change_percent: f64,
    pub summary: String,
    pub insights: Vec<SymbolInsight>,
    pub generated_at: DateTime<Utc>,
}

impl InsightReport {
    pub fn from_insights(insights: Vec<SymbolInsight>, now: DateTime<Utc>) -> Self {
        let average = if insights.is_empty() {
            0.0
        } else {
            insights.iter().map(|i| i.change_percent).sum::<f64>() / insights.len() as f64
        };
        let sentiment = Sentiment::from_change_percent(average);
        let symbols: Vec<&str> = insights.iter().map(|i| i.symbol.as_str()).collect();
        let summary = format!(
            "{} tone: average move {:+.2}% across {}.",
            sentiment.as_str(),
            average,
            symbols.join(", ")
        );

        Self {
            sentiment,
            average_change_percent: average,
            summary,
            insights,
            generated_at: now,
        }
    }
}
