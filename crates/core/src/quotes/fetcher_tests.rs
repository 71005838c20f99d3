//! Tests for QuoteFetcher cache-aside behavior.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use investai_market_data::{MarketDataError, MarketDataProvider};

use crate::cache::{CacheService, CacheStoreTrait, MemoryCacheStore};
use crate::errors::Error;
use crate::quotes::QuoteFetcher;

// =========================================================================
// Mock provider
// =========================================================================

#[derive(Clone, Default)]
struct MockProvider {
    calls: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<HashMap<String, Value>>>,
    fail_with_status: Arc<Mutex<Option<u16>>>,
}

impl MockProvider {
    fn with_response(path: &str, payload: Value) -> Self {
        let provider = Self::default();
        provider
            .responses
            .lock()
            .unwrap()
            .insert(path.to_string(), payload);
        provider
    }

    fn set_failure(&self, status: Option<u16>) {
        *self.fail_with_status.lock().unwrap() = status;
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_json(
        &self,
        endpoint: &str,
        _params: &[(&str, &str)],
    ) -> Result<Value, MarketDataError> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        if let Some(status) = *self.fail_with_status.lock().unwrap() {
            return Err(MarketDataError::UpstreamStatus {
                provider: "MOCK".to_string(),
                status,
            });
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

fn fetcher(provider: &MockProvider) -> (QuoteFetcher, Arc<MemoryCacheStore>) {
    let store = Arc::new(MemoryCacheStore::new());
    let fetcher = QuoteFetcher::new(
        Some(Arc::new(provider.clone())),
        CacheService::new(store.clone()),
    );
    (fetcher, store)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_second_fetch_within_window_hits_cache() {
    let provider = MockProvider::with_response("/quote", json!({"c": 181.92}));
    let (fetcher, _) = fetcher(&provider);

    let first = fetcher.quote("NVDA", 1).await.unwrap();
    let second = fetcher.quote("NVDA", 1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_fetch_without_key_never_touches_store() {
    let provider = MockProvider::with_response("/news", json!([{"headline": "x"}]));
    let (fetcher, store) = fetcher(&provider);

    fetcher
        .fetch("/news", &[("category", "general")], None, 30)
        .await
        .unwrap();
    fetcher
        .fetch("/news", &[("category", "general")], None, 30)
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 2);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_not_cached() {
    let provider = MockProvider::with_response("/quote", json!({"c": 1.0}));
    provider.set_failure(Some(502));
    let (fetcher, store) = fetcher(&provider);

    let err = fetcher.quote("MSFT", 1).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MarketData(MarketDataError::UpstreamStatus { status: 502, .. })
    ));
    assert!(store.get_entry("MSFT").unwrap().is_none());

    // Recovery goes upstream again and then caches
    provider.set_failure(None);
    fetcher.quote("MSFT", 1).await.unwrap();
    assert_eq!(provider.call_count(), 2);
    assert!(store.get_entry("MSFT").unwrap().is_some());
}

#[tokio::test]
async fn test_missing_credential_fails_before_cache() {
    let store = Arc::new(MemoryCacheStore::new());
    store.put_entry("NVDA", json!({"c": 1.0})).await.unwrap();
    let fetcher = QuoteFetcher::new(None, CacheService::new(store));

    let err = fetcher.quote("NVDA", 1).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MarketData(MarketDataError::MissingCredential { .. })
    ));
    assert!(!fetcher.is_configured());
}

#[tokio::test]
async fn test_derived_keys_are_independent() {
    let provider = MockProvider::with_response("/quote", json!({"c": 2.0}));
    let (fetcher, store) = fetcher(&provider);

    fetcher.quote("TSLA", 1).await.unwrap();
    fetcher.quote_with_key("TSLA", "insight:TSLA", 10).await.unwrap();

    assert_eq!(provider.call_count(), 2);
    assert_eq!(store.len(), 2);
}
