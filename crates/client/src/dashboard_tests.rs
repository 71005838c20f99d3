use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

use investai_core::assistant::{ChatRequest, ChatResponse};
use investai_core::market::{InsightReport, MarketQuote};
use investai_core::portfolio::{PortfolioInput, PortfolioItem, PortfolioUpdate};
use investai_core::users::{Credentials, User};
use investai_core::watchlist::WatchlistItem;
use investai_market_data::{Candle, NewsArticle};

use crate::dashboard::{DashboardClient, DataSource};
use crate::direct::{DirectConfig, DirectProvider};
use crate::errors::{ClientError, Result};
use crate::local_store::{LocalStore, StoredPortfolioItem};
use crate::server::ServerApi;

/// Server double that is reachable with a fixed portfolio, down, or
/// answering every call with one error status.
struct MockServer {
    online: AtomicBool,
    rejection: Option<u16>,
    portfolio: Mutex<Vec<PortfolioItem>>,
}

impl MockServer {
    fn offline() -> Arc<Self> {
        Arc::new(Self {
            online: AtomicBool::new(false),
            rejection: None,
            portfolio: Mutex::new(Vec::new()),
        })
    }

    fn online_with(portfolio: Vec<PortfolioItem>) -> Arc<Self> {
        Arc::new(Self {
            online: AtomicBool::new(true),
            rejection: None,
            portfolio: Mutex::new(portfolio),
        })
    }

    fn rejecting(status: u16) -> Arc<Self> {
        Arc::new(Self {
            online: AtomicBool::new(true),
            rejection: Some(status),
            portfolio: Mutex::new(Vec::new()),
        })
    }

    fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        match self.rejection {
            Some(status) => Err(ClientError::Api {
                status,
                code: Some(status),
                message: "rejected".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn unsupported<T>(&self) -> Result<T> {
        self.check()?;
        Err(ClientError::Api {
            status: 500,
            code: None,
            message: "not scripted".to_string(),
        })
    }
}

#[async_trait]
impl ServerApi for MockServer {
    async fn register(&self, _credentials: &Credentials) -> Result<User> {
        self.unsupported()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<User> {
        self.unsupported()
    }

    async fn logout(&self) -> Result<()> {
        self.unsupported()
    }

    async fn me(&self) -> Result<User> {
        self.unsupported()
    }

    async fn get_portfolio(&self) -> Result<Vec<PortfolioItem>> {
        self.check()?;
        Ok(self.portfolio.lock().unwrap().clone())
    }

    async fn add_portfolio(&self, _input: &PortfolioInput) -> Result<PortfolioItem> {
        self.unsupported()
    }

    async fn update_portfolio(&self, _id: i32, _update: &PortfolioUpdate) -> Result<PortfolioItem> {
        self.unsupported()
    }

    async fn remove_portfolio(&self, _id: i32) -> Result<()> {
        self.unsupported()
    }

    async fn get_watchlist(&self) -> Result<Vec<WatchlistItem>> {
        self.unsupported()
    }

    async fn add_watchlist(&self, _symbol: &str) -> Result<WatchlistItem> {
        self.unsupported()
    }

    async fn remove_watchlist(&self, _symbol: &str) -> Result<()> {
        self.unsupported()
    }

    async fn stock_quote(&self, _symbol: &str) -> Result<Value> {
        self.unsupported()
    }

    async fn market_overview(&self) -> Result<Vec<MarketQuote>> {
        self.unsupported()
    }

    async fn market_history(&self, _symbol: &str) -> Result<Vec<Candle>> {
        self.unsupported()
    }

    async fn insights(&self) -> Result<InsightReport> {
        self.unsupported()
    }

    async fn news(&self, _category: &str) -> Result<Vec<NewsArticle>> {
        self.unsupported()
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse> {
        self.unsupported()
    }
}

fn client(server: Arc<MockServer>, direct: DirectConfig) -> (DashboardClient, TempDir) {
    let dir = tempdir().unwrap();
    let client = DashboardClient::new(
        server,
        LocalStore::new(dir.path()),
        DirectProvider::new(direct),
    );
    (client, dir)
}

fn server_row() -> PortfolioItem {
    PortfolioItem {
        id: 41,
        user_id: "u1".to_string(),
        symbol: "AMD".to_string(),
        shares: 3.0,
        avg_cost: 99.0,
        added_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
    }
}

#[tokio::test]
async fn test_server_failure_reads_persisted_snapshot() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    store
        .write_portfolio(&[StoredPortfolioItem {
            id: 1,
            user_id: "local-user".to_string(),
            symbol: "NVDA".to_string(),
            shares: 10.0,
            avg_cost: 120.0,
            added_at: "2025-03-01T09:30:00.000Z".to_string(),
        }])
        .unwrap();
    let client = DashboardClient::new(
        MockServer::offline(),
        store,
        DirectProvider::new(DirectConfig::default()),
    );

    let result = client.portfolio().await.unwrap();

    assert_eq!(result.source, DataSource::LocalSnapshot);
    assert_eq!(result.data.len(), 1);
    let row = &result.data[0];
    assert_eq!(row.symbol, "NVDA");
    assert_eq!(row.shares, 10.0);
    assert_eq!(row.avg_cost, 120.0);
    assert_eq!(
        row.added_at,
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn test_server_answer_wins() {
    let (client, dir) = client(MockServer::online_with(vec![server_row()]), DirectConfig::default());

    let result = client.portfolio().await.unwrap();

    assert_eq!(result.source, DataSource::Server);
    assert!(!result.source.is_degraded());
    assert_eq!(result.data, vec![server_row()]);
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_fallback_is_not_sticky() {
    let server = MockServer::online_with(vec![server_row()]);
    server.set_online(false);
    let (client, _dir) = client(server.clone(), DirectConfig::default());

    assert_eq!(client.portfolio().await.unwrap().source, DataSource::Sample);

    server.set_online(true);
    assert_eq!(client.portfolio().await.unwrap().source, DataSource::Server);
}

#[tokio::test]
async fn test_offline_mutations_persist_locally() {
    let (client, _dir) = client(MockServer::offline(), DirectConfig::default());

    let added = client
        .add_portfolio(PortfolioInput {
            symbol: "jpm".to_string(),
            shares: 2.0,
            avg_cost: 300.0,
        })
        .await
        .unwrap();
    assert_eq!(added.source, DataSource::LocalSnapshot);
    assert_eq!(added.data.symbol, "JPM");

    let listed = client.portfolio().await.unwrap();
    assert_eq!(listed.source, DataSource::LocalSnapshot);
    assert_eq!(listed.data[0].id, added.data.id);

    client.remove_portfolio(added.data.id).await.unwrap();
    let listed = client.portfolio().await.unwrap();
    assert!(listed.data.iter().all(|p| p.id != added.data.id));

    let missing = client
        .update_portfolio(999, PortfolioUpdate::default())
        .await
        .unwrap();
    assert!(missing.data.is_none());
}

#[tokio::test]
async fn test_unsaved_snapshot_is_reported_as_sample() {
    let (client, dir) = client(MockServer::offline(), DirectConfig::default());

    let portfolio = client.portfolio().await.unwrap();
    assert_eq!(portfolio.source, DataSource::Sample);
    assert_eq!(portfolio.data.len(), 3);

    let watchlist = client.watchlist().await.unwrap();
    assert_eq!(watchlist.source, DataSource::Sample);
    assert_eq!(watchlist.data.len(), 5);

    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_rejected_update_leaves_snapshot_alone() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    store
        .write_portfolio(&[StoredPortfolioItem {
            id: 2,
            user_id: "local-user".to_string(),
            symbol: "MSFT".to_string(),
            shares: 1.0,
            avg_cost: 380.0,
            added_at: "2025-03-01T09:30:00.000Z".to_string(),
        }])
        .unwrap();
    let client = DashboardClient::new(
        MockServer::rejecting(404),
        store.clone(),
        DirectProvider::new(DirectConfig::default()),
    );

    let err = client
        .update_portfolio(
            2,
            PortfolioUpdate {
                shares: Some(50.0),
                avg_cost: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    let saved = store.saved_portfolio().unwrap().unwrap();
    assert_eq!(saved[0].shares, 1.0);
}

#[tokio::test]
async fn test_unauthorized_reads_are_not_masked() {
    let (client, dir) = client(MockServer::rejecting(401), DirectConfig::default());

    let err = client.portfolio().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));

    let err = client.add_watchlist("AMD").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());

    let err = client.market_overview().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_server_error_status_still_falls_back() {
    let (client, _dir) = client(MockServer::rejecting(503), DirectConfig::default());

    let added = client.add_watchlist("orcl").await.unwrap();
    assert_eq!(added.source, DataSource::LocalSnapshot);
    assert_eq!(added.data.symbol, "ORCL");

    let watchlist = client.watchlist().await.unwrap();
    assert_eq!(watchlist.source, DataSource::LocalSnapshot);
    assert_eq!(watchlist.data[0].symbol, "ORCL");
}

#[tokio::test]
async fn test_market_data_without_key_uses_sample() {
    let (client, _dir) = client(MockServer::offline(), DirectConfig::default());

    let overview = client.market_overview().await.unwrap();
    assert_eq!(overview.source, DataSource::Sample);
    assert_eq!(overview.data.len(), 5);

    let history = client.market_history("MSFT").await.unwrap();
    assert_eq!(history.source, DataSource::Sample);
    assert_eq!(history.data.len(), 30);

    let quote = client.stock_quote("NVDA").await.unwrap();
    assert_eq!(quote.data["c"], 181.92);

    let err = client.stock_quote("ZZZZ").await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));
}

#[tokio::test]
async fn test_direct_provider_caches_like_the_server() {
    let mut upstream = Server::new_async().await;
    let mock = upstream
        .mock("GET", "/quote")
        .match_query(Matcher::UrlEncoded("symbol".into(), "NVDA".into()))
        .match_header("x-finnhub-token", "user-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"c": 190.5, "d": 2.0, "dp": 1.06, "pc": 188.5}).to_string())
        .expect(1)
        .create_async()
        .await;

    let (client, _dir) = client(
        MockServer::offline(),
        DirectConfig {
            finnhub_api_key: Some("user-key".to_string()),
            finnhub_base_url: Some(upstream.url()),
            ..Default::default()
        },
    );

    let first = client.stock_quote("NVDA").await.unwrap();
    let second = client.stock_quote("NVDA").await.unwrap();

    mock.assert_async().await;
    assert_eq!(first.source, DataSource::DirectProvider);
    assert_eq!(second.data["c"], 190.5);
}

#[tokio::test]
async fn test_failing_direct_provider_falls_through_to_sample() {
    let mut upstream = Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/quote")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let (client, _dir) = client(
        MockServer::offline(),
        DirectConfig {
            finnhub_api_key: Some("user-key".to_string()),
            finnhub_base_url: Some(upstream.url()),
            ..Default::default()
        },
    );

    let insights = client.insights().await.unwrap();
    assert_eq!(insights.source, DataSource::Sample);
    assert_eq!(insights.data.insights.len(), 3);
}

#[tokio::test]
async fn test_chat_without_any_key_is_unavailable() {
    let (client, _dir) = client(MockServer::offline(), DirectConfig::default());

    let err = client
        .chat(ChatRequest {
            prompt: "How is NVDA doing?".to_string(),
            article_url: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));
}
