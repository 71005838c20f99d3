use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use investai_core::rate_limit::RateDecision;

use crate::error::ApiError;
use crate::main_lib::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Client identity: first `X-Forwarded-For` hop, else the socket peer.
pub fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn limit_requests(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let identity = client_identity(req.headers(), peer);

    match state.rate_limiter.check(&identity) {
        RateDecision::Allowed { .. } => Ok(next.run(req).await),
        RateDecision::Limited { retry_after } => {
            tracing::warn!(client = %identity, "rate limit exceeded");
            Err(ApiError::RateLimited { retry_after })
        }
    }
}
