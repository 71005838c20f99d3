use std::fmt::Display;
use std::sync::Arc;

use chrono::Utc;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use investai_core::assistant::{ChatRequest, ChatResponse};
use investai_core::constants::DEFAULT_NEWS_CATEGORY;
use investai_core::market::{InsightReport, MarketQuote};
use investai_core::portfolio::{PortfolioInput, PortfolioItem, PortfolioUpdate};
use investai_core::watchlist::WatchlistItem;
use investai_market_data::{Candle, NewsArticle};

use crate::direct::DirectProvider;
use crate::errors::{ClientError, Result};
use crate::local_store::LocalStore;
use crate::sample;
use crate::server::ServerApi;

/// Which step of the fallback chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSource {
    Server,
    LocalSnapshot,
    DirectProvider,
    Sample,
}

impl DataSource {
    /// Anything but the server means the dashboard is degraded.
    pub fn is_degraded(self) -> bool {
        self != DataSource::Server
    }
}

/// A result tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    fn new(data: T, source: DataSource) -> Self {
        Self { data, source }
    }
}

fn fell_back(what: &str, step: &str, err: impl Display) {
    warn!("{} via {} failed, falling back: {}", what, step, err);
}

/// Continue down the chain only when the server itself is unavailable.
/// Any other server answer, such as a 401 or 404, goes back to the caller.
fn server_down(what: &str, err: ClientError) -> Result<()> {
    if err.is_unavailable() {
        fell_back(what, "server", err);
        Ok(())
    } else {
        Err(err)
    }
}

/// Dashboard data access with graceful degradation.
///
/// Each call starts over at the server; no failure is remembered. Only an
/// unreachable server or a 5xx moves a call on to the next step.
pub struct DashboardClient {
    server: Arc<dyn ServerApi>,
    local: LocalStore,
    direct: DirectProvider,
}

impl DashboardClient {
    pub fn new(server: Arc<dyn ServerApi>, local: LocalStore, direct: DirectProvider) -> Self {
        Self {
            server,
            local,
            direct,
        }
    }

    pub async fn portfolio(&self) -> Result<Sourced<Vec<PortfolioItem>>> {
        match self.server.get_portfolio().await {
            Ok(rows) => return Ok(Sourced::new(rows, DataSource::Server)),
            Err(e) => server_down("portfolio", e)?,
        }
        match self.local.saved_portfolio() {
            Ok(Some(rows)) => return Ok(Sourced::new(rows, DataSource::LocalSnapshot)),
            Ok(None) => {}
            Err(e) => fell_back("portfolio", "local snapshot", e),
        }
        Ok(Sourced::new(sample::portfolio(Utc::now()), DataSource::Sample))
    }

    pub async fn add_portfolio(&self, input: PortfolioInput) -> Result<Sourced<PortfolioItem>> {
        match self.server.add_portfolio(&input).await {
            Ok(item) => Ok(Sourced::new(item, DataSource::Server)),
            Err(e) => {
                server_down("add holding", e)?;
                let item = self.local.add_portfolio(input)?;
                Ok(Sourced::new(item, DataSource::LocalSnapshot))
            }
        }
    }

    /// `None` when the holding is unknown to the snapshot.
    pub async fn update_portfolio(
        &self,
        id: i32,
        update: PortfolioUpdate,
    ) -> Result<Sourced<Option<PortfolioItem>>> {
        match self.server.update_portfolio(id, &update).await {
            Ok(item) => Ok(Sourced::new(Some(item), DataSource::Server)),
            Err(e) => {
                server_down("update holding", e)?;
                let item = self.local.update_portfolio(id, update)?;
                Ok(Sourced::new(item, DataSource::LocalSnapshot))
            }
        }
    }

    pub async fn remove_portfolio(&self, id: i32) -> Result<Sourced<()>> {
        match self.server.remove_portfolio(id).await {
            Ok(()) => Ok(Sourced::new((), DataSource::Server)),
            Err(e) => {
                server_down("remove holding", e)?;
                self.local.remove_portfolio(id)?;
                Ok(Sourced::new((), DataSource::LocalSnapshot))
            }
        }
    }

    pub async fn watchlist(&self) -> Result<Sourced<Vec<WatchlistItem>>> {
        match self.server.get_watchlist().await {
            Ok(rows) => return Ok(Sourced::new(rows, DataSource::Server)),
            Err(e) => server_down("watchlist", e)?,
        }
        match self.local.saved_watchlist() {
            Ok(Some(rows)) => return Ok(Sourced::new(rows, DataSource::LocalSnapshot)),
            Ok(None) => {}
            Err(e) => fell_back("watchlist", "local snapshot", e),
        }
        Ok(Sourced::new(sample::watchlist(Utc::now()), DataSource::Sample))
    }

    pub async fn add_watchlist(&self, symbol: &str) -> Result<Sourced<WatchlistItem>> {
        match self.server.add_watchlist(symbol).await {
            Ok(item) => Ok(Sourced::new(item, DataSource::Server)),
            Err(e) => {
                server_down("watch symbol", e)?;
                let item = self.local.add_watchlist(symbol)?;
                Ok(Sourced::new(item, DataSource::LocalSnapshot))
            }
        }
    }

    pub async fn remove_watchlist(&self, symbol: &str) -> Result<Sourced<()>> {
        match self.server.remove_watchlist(symbol).await {
            Ok(()) => Ok(Sourced::new((), DataSource::Server)),
            Err(e) => {
                server_down("unwatch symbol", e)?;
                self.local.remove_watchlist(symbol)?;
                Ok(Sourced::new((), DataSource::LocalSnapshot))
            }
        }
    }

    /// Raw provider quote payload for `symbol`.
    pub async fn stock_quote(&self, symbol: &str) -> Result<Sourced<Value>> {
        match self.server.stock_quote(symbol).await {
            Ok(quote) => return Ok(Sourced::new(quote, DataSource::Server)),
            Err(e) => server_down("quote", e)?,
        }
        if let Some(market) = self.direct.market() {
            match market.quote(symbol).await {
                Ok(quote) => return Ok(Sourced::new(quote, DataSource::DirectProvider)),
                Err(e) => fell_back("quote", "direct provider", e),
            }
        }
        sample::quote(symbol)
            .map(|quote| Sourced::new(quote, DataSource::Sample))
            .ok_or_else(|| ClientError::Unavailable(format!("quote for {}", symbol)))
    }

    pub async fn market_overview(&self) -> Result<Sourced<Vec<MarketQuote>>> {
        match self.server.market_overview().await {
            Ok(quotes) => return Ok(Sourced::new(quotes, DataSource::Server)),
            Err(e) => server_down("overview", e)?,
        }
        if let Some(market) = self.direct.market() {
            match market.overview().await {
                Ok(quotes) => return Ok(Sourced::new(quotes, DataSource::DirectProvider)),
                Err(e) => fell_back("overview", "direct provider", e),
            }
        }
        Ok(Sourced::new(sample::overview(), DataSource::Sample))
    }

    pub async fn market_history(&self, symbol: &str) -> Result<Sourced<Vec<Candle>>> {
        match self.server.market_history(symbol).await {
            Ok(candles) => return Ok(Sourced::new(candles, DataSource::Server)),
            Err(e) => server_down("history", e)?,
        }
        if let Some(market) = self.direct.market() {
            match market.history(symbol).await {
                Ok(candles) => return Ok(Sourced::new(candles, DataSource::DirectProvider)),
                Err(e) => fell_back("history", "direct provider", e),
            }
        }
        Ok(Sourced::new(
            sample::history(symbol, Utc::now()),
            DataSource::Sample,
        ))
    }

    pub async fn insights(&self) -> Result<Sourced<InsightReport>> {
        match self.server.insights().await {
            Ok(report) => return Ok(Sourced::new(report, DataSource::Server)),
            Err(e) => server_down("insights", e)?,
        }
        if let Some(market) = self.direct.market() {
            match market.insights().await {
                Ok(report) => return Ok(Sourced::new(report, DataSource::DirectProvider)),
                Err(e) => fell_back("insights", "direct provider", e),
            }
        }
        Ok(Sourced::new(sample::insights(Utc::now()), DataSource::Sample))
    }

    pub async fn news(&self, category: Option<&str>) -> Result<Sourced<Vec<NewsArticle>>> {
        let category = category.unwrap_or(DEFAULT_NEWS_CATEGORY);
        match self.server.news(category).await {
            Ok(articles) => return Ok(Sourced::new(articles, DataSource::Server)),
            Err(e) => server_down("news", e)?,
        }
        if let Some(market) = self.direct.market() {
            match market.news(Some(category)).await {
                Ok(articles) => return Ok(Sourced::new(articles, DataSource::DirectProvider)),
                Err(e) => fell_back("news", "direct provider", e),
            }
        }
        Ok(Sourced::new(sample::news(), DataSource::Sample))
    }

    /// AI chat through the server, else directly with the user's own AI key.
    /// There is no sample answer.
    pub async fn chat(&self, request: ChatRequest) -> Result<Sourced<ChatResponse>> {
        match self.server.chat(&request).await {
            Ok(response) => return Ok(Sourced::new(response, DataSource::Server)),
            Err(e) => server_down("chat", e)?,
        }
        match self.direct.assistant() {
            Some(assistant) => {
                let response = assistant.chat(request).await?;
                Ok(Sourced::new(response, DataSource::DirectProvider))
            }
            None => Err(ClientError::Unavailable("AI chat".to_string())),
        }
    }
}
