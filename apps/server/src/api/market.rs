use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use investai_core::market::{InsightReport, MarketQuote};
use investai_market_data::{Candle, NewsArticle};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::{api::ApiPath, error::ApiResult, main_lib::AppState};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NewsQuery {
    /// Feed category, `general` when absent.
    category: Option<String>,
}

#[utoipa::path(get, path = "/api/stock/{symbol}", params(("symbol" = String, Path, description = "Ticker symbol")), responses((status = 200, description = "Provider quote payload"), (status = 429, description = "Rate limited")))]
pub async fn stock_quote(
    State(state): State<Arc<AppState>>,
    ApiPath(symbol): ApiPath<String>,
) -> ApiResult<Json<Value>> {
    let quote = state.market_service.quote(&symbol).await?;
    Ok(Json(quote))
}

#[utoipa::path(get, path = "/api/market/overview", responses((status = 200, description = "Overview quotes")))]
pub async fn market_overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MarketQuote>>> {
    let quotes = state.market_service.overview().await?;
    Ok(Json(quotes))
}

#[utoipa::path(get, path = "/api/market/history/{symbol}", params(("symbol" = String, Path, description = "Ticker symbol")), responses((status = 200, description = "Thirty days of daily candles")))]
pub async fn market_history(
    State(state): State<Arc<AppState>>,
    ApiPath(symbol): ApiPath<String>,
) -> ApiResult<Json<Vec<Candle>>> {
    let candles = state.market_service.history(&symbol).await?;
    Ok(Json(candles))
}

#[utoipa::path(get, path = "/api/insights", responses((status = 200, description = "Heuristic sentiment")))]
pub async fn insights(State(state): State<Arc<AppState>>) -> ApiResult<Json<InsightReport>> {
    let report = state.market_service.insights().await?;
    Ok(Json(report))
}

#[utoipa::path(get, path = "/api/news", params(NewsQuery), responses((status = 200, description = "Up to ten articles")))]
pub async fn news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<NewsArticle>>> {
    let articles = state.market_service.news(query.category.as_deref()).await?;
    Ok(Json(articles))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stock/{symbol}", get(stock_quote))
        .route("/market/overview", get(market_overview))
        .route("/market/history/{symbol}", get(market_history))
        .route("/insights", get(insights))
        .route("/news", get(news))
}
