//! HTTP client for the InvestAI server API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use investai_core::assistant::{ChatRequest, ChatResponse};
use investai_core::market::{InsightReport, MarketQuote};
use investai_core::portfolio::{PortfolioInput, PortfolioItem, PortfolioUpdate};
use investai_core::users::{Credentials, User};
use investai_core::watchlist::{WatchlistInput, WatchlistItem};
use investai_market_data::{Candle, NewsArticle};

use crate::errors::{ClientError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Server API surface used by the dashboard.
#[async_trait]
pub trait ServerApi: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<User>;
    async fn login(&self, credentials: &Credentials) -> Result<User>;
    async fn logout(&self) -> Result<()>;
    async fn me(&self) -> Result<User>;

    async fn get_portfolio(&self) -> Result<Vec<PortfolioItem>>;
    async fn add_portfolio(&self, input: &PortfolioInput) -> Result<PortfolioItem>;
    async fn update_portfolio(&self, id: i32, update: &PortfolioUpdate) -> Result<PortfolioItem>;
    async fn remove_portfolio(&self, id: i32) -> Result<()>;

    async fn get_watchlist(&self) -> Result<Vec<WatchlistItem>>;
    async fn add_watchlist(&self, symbol: &str) -> Result<WatchlistItem>;
    async fn remove_watchlist(&self, symbol: &str) -> Result<()>;

    async fn stock_quote(&self, symbol: &str) -> Result<Value>;
    async fn market_overview(&self) -> Result<Vec<MarketQuote>>;
    async fn market_history(&self, symbol: &str) -> Result<Vec<Candle>>;
    async fn insights(&self) -> Result<InsightReport>;
    async fn news(&self, category: &str) -> Result<Vec<NewsArticle>>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed [`ServerApi`]. The session cookie is kept in the client's
/// cookie store, so one instance represents one signed-in user.
#[derive(Debug, Clone)]
pub struct HttpServerApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServerApi {
    /// `base_url` is the server origin, e.g. `http://localhost:5001`.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("[ServerApi] GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("[ServerApi] {} {}", method, path);
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        debug!("[ServerApi] DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        Self::parse_response::<Value>(response).await.map(|_| ())
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed = serde_json::from_str::<ApiErrorBody>(&body).ok();
            let (code, message) = match parsed {
                Some(err) => (err.code, err.message),
                None => (None, None),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message: message.unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        serde_json::from_str(&body).map_err(ClientError::from)
    }
}

#[async_trait]
impl ServerApi for HttpServerApi {
    async fn register(&self, credentials: &Credentials) -> Result<User> {
        self.send_json(reqwest::Method::POST, "/auth/register", credentials)
            .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<User> {
        self.send_json(reqwest::Method::POST, "/auth/login", credentials)
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.send_json::<_, Value>(reqwest::Method::POST, "/auth/logout", &Value::Null)
            .await
            .map(|_| ())
    }

    async fn me(&self) -> Result<User> {
        self.get("/auth/me").await
    }

    async fn get_portfolio(&self) -> Result<Vec<PortfolioItem>> {
        self.get("/portfolio").await
    }

    async fn add_portfolio(&self, input: &PortfolioInput) -> Result<PortfolioItem> {
        self.send_json(reqwest::Method::POST, "/portfolio", input).await
    }

    async fn update_portfolio(&self, id: i32, update: &PortfolioUpdate) -> Result<PortfolioItem> {
        self.send_json(reqwest::Method::PATCH, &format!("/portfolio/{}", id), update)
            .await
    }

    async fn remove_portfolio(&self, id: i32) -> Result<()> {
        self.delete(&format!("/portfolio/{}", id)).await
    }

    async fn get_watchlist(&self) -> Result<Vec<WatchlistItem>> {
        self.get("/watchlist").await
    }

    async fn add_watchlist(&self, symbol: &str) -> Result<WatchlistItem> {
        let input = WatchlistInput {
            symbol: symbol.to_string(),
        };
        self.send_json(reqwest::Method::POST, "/watchlist", &input).await
    }

    async fn remove_watchlist(&self, symbol: &str) -> Result<()> {
        self.delete(&format!("/watchlist/{}", symbol)).await
    }

    async fn stock_quote(&self, symbol: &str) -> Result<Value> {
        self.get(&format!("/stock/{}", symbol)).await
    }

    async fn market_overview(&self) -> Result<Vec<MarketQuote>> {
        self.get("/market/overview").await
    }

    async fn market_history(&self, symbol: &str) -> Result<Vec<Candle>> {
        self.get(&format!("/market/history/{}", symbol)).await
    }

    async fn insights(&self) -> Result<InsightReport> {
        self.get("/insights").await
    }

    async fn news(&self, category: &str) -> Result<Vec<NewsArticle>> {
        debug!("[ServerApi] GET /news");
        let response = self
            .client
            .get(self.url("/news"))
            .query(&[("category", category)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.send_json(reqwest::Method::POST, "/ai/chat", request).await
    }
}
