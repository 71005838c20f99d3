//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to a market data provider.
///
/// None of these are retried inside this crate. Callers decide how to surface
/// them; the server turns every variant into a generic 500.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No provider credential is configured for this request path.
    #[error("Missing credential for provider: {provider}")]
    MissingCredential {
        /// The provider that needs a key
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429, or 403 on quota).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-2xx status.
    #[error("Provider error: {provider} - HTTP {status}")]
    UpstreamStatus {
        /// The provider that returned the status
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// A provider-specific error occurred (transport failure, unreadable body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message
        message: String,
    },

    /// A payload did not have the expected shape.
    #[error("Invalid payload: {message}")]
    InvalidPayload {
        /// Description of the mismatch
        message: String,
    },
}

impl MarketDataError {
    /// Whether the failure was produced by configuration rather than the network.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}
