//! Fixed window rate limiter keyed by client identity.
//!
//! Each identity (usually the client IP) gets a counter that resets when its
//! window elapses. Counters live in a sharded map so concurrent requests for
//! the same identity increment under the shard lock.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use log::debug;

/// Default: 60 requests per identity.
const DEFAULT_MAX_REQUESTS: u32 = 60;

/// Default window: 5 minutes.
const DEFAULT_WINDOW: Duration = Duration::from_secs(300);

/// Prune expired identities at most this often.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Outcome of a single request check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// In-memory, best-effort limiter. State is lost on restart.
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: DashMap<String, Window>,
    last_prune: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
            last_prune: Mutex::new(Instant::now()),
        }
    }

    /// Count one request for `identity` at the current instant.
    pub fn check(&self, identity: &str) -> RateDecision {
        self.check_at(identity, Instant::now())
    }

    /// Count one request for `identity` at `now`.
    pub fn check_at(&self, identity: &str, now: Instant) -> RateDecision {
        self.maybe_prune(now);

        let mut window = self.windows.entry(identity.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started) >= self.config.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.config.max_requests {
            let elapsed = now.saturating_duration_since(window.started);
            let retry_after = self.config.window.saturating_sub(elapsed);
            debug!("Rate limit hit for {} ({} requests)", identity, window.count);
            return RateDecision::Limited { retry_after };
        }

        window.count += 1;
        RateDecision::Allowed {
            remaining: self.config.max_requests - window.count,
        }
    }

    /// Number of identities currently tracked.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }

    fn maybe_prune(&self, now: Instant) {
        let mut last = match self.last_prune.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if now.saturating_duration_since(*last) < PRUNE_INTERVAL {
            return;
        }
        *last = now;
        drop(last);

        let window = self.config.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < window);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
