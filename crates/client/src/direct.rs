//! Bring-your-own-key access to the market data and AI providers.
//!
//! Used only when the server cannot answer. Caching follows the same max-age
//! rules as the server but lives in a private in-memory store.

use std::sync::Arc;
use std::time::Duration;

use investai_core::assistant::{
    AssistantService, CompletionClientTrait, CompletionConfig, OpenAiCompatibleClient,
};
use investai_core::cache::{CacheService, MemoryCacheStore};
use investai_core::market::MarketService;
use investai_core::quotes::QuoteFetcher;
use investai_market_data::{FinnhubProvider, MarketDataProvider, DEFAULT_BASE_URL};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Keys the user supplied locally. Blank keys count as absent.
#[derive(Debug, Clone, Default)]
pub struct DirectConfig {
    pub finnhub_api_key: Option<String>,
    pub finnhub_base_url: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_base_url: Option<String>,
}

fn present(key: &Option<String>) -> Option<String> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

pub struct DirectProvider {
    market: Option<MarketService>,
    assistant: Option<AssistantService>,
}

impl DirectProvider {
    pub fn new(config: DirectConfig) -> Self {
        let provider: Option<Arc<dyn MarketDataProvider>> =
            present(&config.finnhub_api_key).map(|key| {
                let base_url = config
                    .finnhub_base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                Arc::new(FinnhubProvider::with_base_url(base_url, key, PROVIDER_TIMEOUT))
                    as Arc<dyn MarketDataProvider>
            });
        let has_provider = provider.is_some();

        let cache = CacheService::new(Arc::new(MemoryCacheStore::new()));
        let fetcher = QuoteFetcher::new(provider, cache);

        let completion: Option<Arc<dyn CompletionClientTrait>> =
            present(&config.ai_api_key).map(|key| {
                let mut completion_config = CompletionConfig::new(key);
                if let Some(base_url) = config.ai_base_url.clone() {
                    completion_config.base_url = base_url;
                }
                Arc::new(OpenAiCompatibleClient::new(completion_config))
                    as Arc<dyn CompletionClientTrait>
            });

        let assistant = completion.map(|c| AssistantService::new(Some(c), fetcher.clone()));
        let market = has_provider.then(|| MarketService::new(fetcher));

        Self { market, assistant }
    }

    /// Market views, when a provider key is configured.
    pub fn market(&self) -> Option<&MarketService> {
        self.market.as_ref()
    }

    /// AI chat, when an AI key is configured. Quote context is only added
    /// when a provider key is configured too.
    pub fn assistant(&self) -> Option<&AssistantService> {
        self.assistant.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keys_disable_paths() {
        let direct = DirectProvider::new(DirectConfig {
            finnhub_api_key: Some("   ".to_string()),
            ai_api_key: None,
            ..Default::default()
        });
        assert!(direct.market().is_none());
        assert!(direct.assistant().is_none());
    }

    #[test]
    fn test_keys_enable_paths() {
        let direct = DirectProvider::new(DirectConfig {
            finnhub_api_key: Some("fh-key".to_string()),
            ai_api_key: Some("ai-key".to_string()),
            ..Default::default()
        });
        assert!(direct.market().is_some());
        assert!(direct.assistant().is_some());
    }
}
