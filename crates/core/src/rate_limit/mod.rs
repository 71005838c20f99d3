//! Per-client fixed-window request limiting.

mod rate_limiter;

pub use rate_limiter::{RateDecision, RateLimitConfig, RateLimiter};
