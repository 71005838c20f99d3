use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use investai_core::{
    assistant::{AssistantService, CompletionClientTrait, CompletionConfig, OpenAiCompatibleClient},
    cache::CacheService,
    market::MarketService,
    portfolio::{PortfolioService, PortfolioServiceTrait},
    quotes::QuoteFetcher,
    rate_limit::RateLimiter,
    users::{UserService, UserServiceTrait},
    watchlist::{WatchlistService, WatchlistServiceTrait},
};
use investai_market_data::{FinnhubProvider, MarketDataProvider};
use investai_storage_sqlite::{
    db, CacheRepository, PortfolioRepository, SessionRepository, UserRepository,
    WatchlistRepository,
};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub market_service: MarketService,
    pub assistant_service: AssistantService,
    pub rate_limiter: Arc<RateLimiter>,
    /// Mark session cookies `Secure`.
    pub secure_cookies: bool,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let session_repository = Arc::new(SessionRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repository, session_repository));

    let watchlist_repository = Arc::new(WatchlistRepository::new(pool.clone(), writer.clone()));
    let watchlist_service = Arc::new(WatchlistService::new(watchlist_repository));

    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let portfolio_service = Arc::new(PortfolioService::new(portfolio_repository));

    let cache_repository = Arc::new(CacheRepository::new(pool.clone(), writer.clone()));
    let cache_service = CacheService::new(cache_repository);

    let provider: Option<Arc<dyn MarketDataProvider>> = match &config.finnhub_api_key {
        Some(key) => Some(Arc::new(FinnhubProvider::with_base_url(
            config.finnhub_base_url.clone(),
            key.clone(),
            config.provider_timeout,
        ))),
        None => {
            tracing::warn!("FINNHUB_API_KEY is not set; market data routes will fail");
            None
        }
    };
    let fetcher = QuoteFetcher::new(provider, cache_service);

    let completion: Option<Arc<dyn CompletionClientTrait>> = match &config.ai_api_key {
        Some(key) => {
            let mut completion_config = CompletionConfig::new(key.clone());
            if let Some(base_url) = &config.ai_base_url {
                completion_config.base_url = base_url.clone();
            }
            if let Some(model) = &config.ai_model {
                completion_config.model = model.clone();
            }
            Some(Arc::new(OpenAiCompatibleClient::new(completion_config)))
        }
        None => {
            tracing::warn!("AI_API_KEY is not set; AI chat will fail");
            None
        }
    };

    Ok(Arc::new(AppState {
        user_service,
        watchlist_service,
        portfolio_service,
        market_service: MarketService::new(fetcher.clone()),
        assistant_service: AssistantService::new(completion, fetcher),
        rate_limiter: Arc::new(RateLimiter::new(config.rate_limit.clone())),
        secure_cookies: config.production,
    }))
}
