//! Finnhub market data provider implementation.
//!
//! Endpoints used by the dashboard:
//! - `/quote` for the latest quote of a symbol
//! - `/stock/candle` for daily candles
//! - `/news` for the general market news feed
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::MarketDataProvider;

/// Public Finnhub REST base URL.
pub const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Finnhub market data provider.
///
/// The credential is sent in the `X-Finnhub-Token` header rather than the
/// query string so it does not end up in access logs.
pub struct FinnhubProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a provider against the public Finnhub endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider against a custom base URL (proxies, tests).
    pub fn with_base_url(base_url: impl Into<String>, api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn map_send_error(e: reqwest::Error) -> MarketDataError {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Request failed: {}", e),
            }
        }
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MarketDataError> {
        if self.api_key.trim().is_empty() {
            return Err(MarketDataError::MissingCredential {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Finnhub request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .header("X-Finnhub-Token", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();

        // 403 is what Finnhub answers once the key's quota is exhausted
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            warn!("Finnhub {} answered HTTP {}", endpoint, status.as_u16());
            return Err(MarketDataError::UpstreamStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn provider_for(server: &Server, key: &str) -> FinnhubProvider {
        FinnhubProvider::with_base_url(server.url(), key.to_string(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_quote_request_sends_token_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::UrlEncoded("symbol".into(), "NVDA".into()))
            .match_header("x-finnhub-token", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"c": 181.92, "d": -1.88, "dp": -0.74, "h": 184.0, "l": 180.1, "o": 183.5, "pc": 183.8, "t": 1704067200}"#)
            .create_async()
            .await;

        let provider = provider_for(&server, "test-key");
        let payload = provider
            .get_json("/quote", &[("symbol", "NVDA")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(payload["c"], 181.92);
        assert_eq!(payload["pc"], 183.8);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": "internal details"}"#)
            .create_async()
            .await;

        let provider = provider_for(&server, "test-key");
        let err = provider
            .get_json("/quote", &[("symbol", "NVDA")])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MarketDataError::UpstreamStatus { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_too_many_requests_maps_to_rate_limited() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/news")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let provider = provider_for(&server, "test-key");
        let err = provider
            .get_json("/news", &[("category", "general")])
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_blank_key_never_hits_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/quote")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let provider = provider_for(&server, "  ");
        let err = provider
            .get_json("/quote", &[("symbol", "NVDA")])
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.is_configuration());
    }
}
