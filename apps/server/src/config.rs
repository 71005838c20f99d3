use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use investai_core::rate_limit::RateLimitConfig;
use investai_market_data::DEFAULT_BASE_URL as FINNHUB_DEFAULT_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Production mode marks the session cookie `Secure`.
    pub production: bool,
    pub finnhub_api_key: Option<String>,
    pub finnhub_base_url: String,
    pub provider_timeout: Duration,
    pub rate_limit: RateLimitConfig,
    pub ai_api_key: Option<String>,
    pub ai_base_url: Option<String>,
    pub ai_model: Option<String>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            db_path: "./db/app.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            static_dir: "dist".to_string(),
            production: false,
            finnhub_api_key: None,
            finnhub_base_url: FINNHUB_DEFAULT_BASE_URL.to_string(),
            provider_timeout: Duration::from_millis(10_000),
            rate_limit: RateLimitConfig::default(),
            ai_api_key: None,
            ai_base_url: None,
            ai_model: None,
            log_format: LogFormat::Text,
        }
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    var(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match var("IA_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid IA_LISTEN_ADDR: {}", raw))?,
            None => defaults.listen_addr,
        };
        let cors_allow = var("IA_CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow);
        let timeout_ms = parse_var("IA_REQUEST_TIMEOUT_MS", 30_000u64);
        let provider_timeout_ms = parse_var("IA_PROVIDER_TIMEOUT_MS", 10_000u64);
        let rate_limit = RateLimitConfig {
            max_requests: parse_var("IA_RATE_LIMIT_MAX", defaults.rate_limit.max_requests),
            window: Duration::from_secs(parse_var(
                "IA_RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit.window.as_secs(),
            )),
        };
        let log_format = match var("IA_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path: var("IA_DB_PATH").unwrap_or(defaults.db_path),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir: var("IA_STATIC_DIR").unwrap_or(defaults.static_dir),
            production: var("IA_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production")),
            finnhub_api_key: var("FINNHUB_API_KEY"),
            finnhub_base_url: var("FINNHUB_BASE_URL").unwrap_or(defaults.finnhub_base_url),
            provider_timeout: Duration::from_millis(provider_timeout_ms),
            rate_limit,
            ai_api_key: var("AI_API_KEY"),
            ai_base_url: var("AI_BASE_URL"),
            ai_model: var("AI_MODEL"),
            log_format,
        })
    }
}
