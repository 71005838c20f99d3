use chrono::{Duration, Utc};
use futures::future::join_all;
use log::warn;
use serde_json::Value;

use investai_market_data::{Candle, CandleSeries, NewsArticle, QuoteSnapshot};

use super::market_model::{InsightReport, MarketQuote, SymbolInsight};
use crate::constants::{
    DEFAULT_NEWS_CATEGORY, HISTORY_DAYS, HISTORY_MAX_AGE_MINUTES, INSIGHT_MAX_AGE_MINUTES,
    INSIGHT_SYMBOLS, NEWS_LIMIT, NEWS_MAX_AGE_MINUTES, OVERVIEW_SYMBOLS, QUOTE_MAX_AGE_MINUTES,
};
use crate::errors::{Error, Result};
use crate::quotes::QuoteFetcher;
use crate::utils::symbols::normalize_symbol;

const CANDLE_PATH: &str = "/stock/candle";
const NEWS_PATH: &str = "/news";

/// Read-side views over the quote fetcher: overview, history, insights, news.
#[derive(Clone)]
pub struct MarketService {
    fetcher: QuoteFetcher,
}

impl MarketService {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self { fetcher }
    }

    /// Latest quote for a single symbol, raw provider payload.
    pub async fn quote(&self, symbol: &str) -> Result<Value> {
        let symbol = normalize_symbol(symbol)?;
        self.fetcher.quote(&symbol, QUOTE_MAX_AGE_MINUTES).await
    }

    /// Quotes for the overview symbols. Failing symbols are left out; the
    /// call fails only when none succeed.
    pub async fn overview(&self) -> Result<Vec<MarketQuote>> {
        let results = join_all(
            OVERVIEW_SYMBOLS
                .iter()
                .map(|&symbol| self.fetcher.quote(symbol, QUOTE_MAX_AGE_MINUTES)),
        )
        .await;

        collect_or_first_error(OVERVIEW_SYMBOLS.iter().copied().zip(results), |symbol, payload| {
            QuoteSnapshot::from_payload(&payload)
                .map(|quote| MarketQuote::from_snapshot(symbol, &quote))
                .map_err(Error::from)
        })
    }

    /// Daily candles over the last thirty days.
    pub async fn history(&self, symbol: &str) -> Result<Vec<Candle>> {
        let symbol = normalize_symbol(symbol)?;
        let to = Utc::now();
        let from = to - Duration::days(HISTORY_DAYS);
        let (from, to) = (from.timestamp().to_string(), to.timestamp().to_string());

        let cache_key = format!("history:{}", symbol);
        let payload = self
            .fetcher
            .fetch(
                CANDLE_PATH,
                &[
                    ("symbol", symbol.as_str()),
                    ("resolution", "D"),
                    ("from", from.as_str()),
                    ("to", to.as_str()),
                ],
                Some(&cache_key),
                HISTORY_MAX_AGE_MINUTES,
            )
            .await?;

        Ok(CandleSeries::from_payload(&payload)?.into_candles())
    }

    /// Heuristic sentiment over the insight symbols.
    pub async fn insights(&self) -> Result<InsightReport> {
        let keys: Vec<String> = INSIGHT_SYMBOLS
            .iter()
            .map(|symbol| format!("insight:{}", symbol))
            .collect();
        let results = join_all(
            INSIGHT_SYMBOLS
                .iter()
                .zip(&keys)
                .map(|(&symbol, key)| {
                    self.fetcher
                        .quote_with_key(symbol, key, INSIGHT_MAX_AGE_MINUTES)
                }),
        )
        .await;

        let insights =
            collect_or_first_error(INSIGHT_SYMBOLS.iter().copied().zip(results), |symbol, payload| {
                QuoteSnapshot::from_payload(&payload)
                    .map(|quote| SymbolInsight::from_snapshot(symbol, &quote))
                    .map_err(Error::from)
            })?;

        Ok(InsightReport::from_insights(insights, Utc::now()))
    }

    /// Latest articles for `category`. The cache keeps the full feed.
    pub async fn news(&self, category: Option<&str>) -> Result<Vec<NewsArticle>> {
        let category = normalize_category(category)?;

        let cache_key = format!("news:{}", category);
        let payload = self
            .fetcher
            .fetch(
                NEWS_PATH,
                &[("category", category.as_str())],
                Some(&cache_key),
                NEWS_MAX_AGE_MINUTES,
            )
            .await?;

        let items = payload.as_array().cloned().unwrap_or_default();
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<NewsArticle>(item) {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("Skipping malformed news item: {}", e);
                    None
                }
            })
            .take(NEWS_LIMIT)
            .collect())
    }
}

fn normalize_category(category: Option<&str>) -> Result<String> {
    let category = category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_NEWS_CATEGORY.to_string());

    if category.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(category)
    } else {
        Err(Error::invalid_field("category", "must be alphanumeric"))
    }
}

/// Keep the per-symbol successes; fail with the first error only when
/// nothing succeeded.
fn collect_or_first_error<T>(
    results: impl Iterator<Item = (&'static str, Result<Value>)>,
    project: impl Fn(&str, Value) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut first_error = None;

    for (symbol, result) in results {
        match result.and_then(|payload| project(symbol, payload)) {
            Ok(item) => items.push(item),
            Err(e) => {
                warn!("Dropping {} from market view: {}", symbol, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if items.is_empty() => Err(e),
        _ => Ok(items),
    }
}
