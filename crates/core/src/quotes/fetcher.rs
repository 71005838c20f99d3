use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use investai_market_data::{MarketDataError, MarketDataProvider};

use crate::cache::CacheService;
use crate::errors::Result;

/// Provider path for the latest quote of a symbol.
pub const QUOTE_PATH: &str = "/quote";

/// Calls the market data provider and writes successful payloads through to
/// the cache.
///
/// No retries happen here. Failed fetches are never cached.
#[derive(Clone)]
pub struct QuoteFetcher {
    provider: Option<Arc<dyn MarketDataProvider>>,
    cache: CacheService,
}

impl QuoteFetcher {
    /// `provider` is `None` when no credential is configured.
    pub fn new(provider: Option<Arc<dyn MarketDataProvider>>, cache: CacheService) -> Self {
        Self { provider, cache }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Fetch `path` with `params`.
    ///
    /// With a `cache_key`, a fresh cached payload short-circuits the network
    /// call and a fresh upstream payload is stored under the key. Without
    /// one the store is never touched.
    pub async fn fetch(
        &self,
        path: &str,
        params: &[(&str, &str)],
        cache_key: Option<&str>,
        max_age_minutes: i64,
    ) -> Result<Value> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| MarketDataError::MissingCredential {
                provider: "FINNHUB".to_string(),
            })?;

        if let Some(key) = cache_key {
            if let Some(payload) = self.cache.get(key, max_age_minutes)? {
                debug!("Cache hit for '{}'", key);
                return Ok(payload);
            }
        }

        let payload = provider.get_json(path, params).await.map_err(|e| {
            warn!("{} fetch of {} failed: {}", provider.id(), path, e);
            e
        })?;

        if let Some(key) = cache_key {
            self.cache.put(key, payload.clone()).await?;
        }

        Ok(payload)
    }

    /// Latest quote for `symbol`, cached under the symbol itself.
    pub async fn quote(&self, symbol: &str, max_age_minutes: i64) -> Result<Value> {
        self.fetch(QUOTE_PATH, &[("symbol", symbol)], Some(symbol), max_age_minutes)
            .await
    }

    /// Latest quote for `symbol` under an explicit cache key.
    pub async fn quote_with_key(
        &self,
        symbol: &str,
        cache_key: &str,
        max_age_minutes: i64,
    ) -> Result<Value> {
        self.fetch(QUOTE_PATH, &[("symbol", symbol)], Some(cache_key), max_age_minutes)
            .await
    }
}
