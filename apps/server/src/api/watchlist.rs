use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Extension, Json, Router,
};
use investai_core::watchlist::{WatchlistInput, WatchlistItem};

use crate::{
    api::{ApiJson, ApiPath, Success},
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
};

#[utoipa::path(get, path = "/api/watchlist", responses((status = 200, description = "Watched symbols, newest first")))]
pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<WatchlistItem>>> {
    let items = state.watchlist_service.get_watchlist(&user.id)?;
    Ok(Json(items))
}

#[utoipa::path(post, path = "/api/watchlist", responses((status = 200, description = "Watched symbol")))]
pub async fn add_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(input): ApiJson<WatchlistInput>,
) -> ApiResult<Json<WatchlistItem>> {
    let item = state.watchlist_service.add_symbol(&user.id, input).await?;
    Ok(Json(item))
}

#[utoipa::path(delete, path = "/api/watchlist/{symbol}", params(("symbol" = String, Path, description = "Ticker symbol")), responses((status = 200, description = "Removed")))]
pub async fn remove_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(symbol): ApiPath<String>,
) -> ApiResult<Json<Success>> {
    state
        .watchlist_service
        .remove_symbol(&user.id, &symbol)
        .await?;
    Ok(Success::json())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlist", get(list_watchlist).post(add_watchlist))
        .route("/watchlist/{symbol}", delete(remove_watchlist))
}
