//! Market data provider trait definitions.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MarketDataError;

/// Trait for market data providers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use investai_market_data::{MarketDataError, MarketDataProvider};
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn get_json(
///         &self,
///         _endpoint: &str,
///         _params: &[(&str, &str)],
///     ) -> Result<serde_json::Value, MarketDataError> {
///         Ok(serde_json::json!({ "c": 1.0 }))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Perform a GET against `endpoint` (e.g. `/quote`) with query `params`.
    ///
    /// Only 2xx responses produce `Ok`. Anything else is an error and must
    /// not be cached by the caller.
    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MarketDataError>;
}
