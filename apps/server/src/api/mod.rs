use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::HeaderValue,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::require_session, config::Config, error::ApiError, main_lib::AppState,
    rate_limit::limit_requests,
};

mod ai;
mod auth;
mod health;
mod market;
mod portfolio;
mod watchlist;

/// JSON body extractor whose rejections use the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections use the API error shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn json() -> Json<Self> {
        Json(Self { success: true })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        watchlist::list_watchlist,
        watchlist::add_watchlist,
        watchlist::remove_watchlist,
        portfolio::list_portfolio,
        portfolio::add_holding,
        portfolio::update_holding,
        portfolio::remove_holding,
        market::stock_quote,
        market::market_overview,
        market::market_history,
        market::insights,
        market::news,
        ai::chat,
    ),
    tags((name = "investai"))
)]
pub struct ApiDoc;

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(AnyOrigin)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins).allow_credentials(true)
    };

    let openapi = ApiDoc::openapi();
    let session = from_fn_with_state(state.clone(), require_session);
    let limited = from_fn_with_state(state.clone(), limit_requests);

    let api = Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(
            watchlist::router()
                .merge(portfolio::router())
                .route_layer(session.clone()),
        )
        .merge(market::router().route_layer(limited.clone()))
        .merge(ai::router().route_layer(session).route_layer(limited));

    Router::new()
        .nest("/api", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
}
