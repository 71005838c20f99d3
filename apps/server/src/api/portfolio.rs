use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, patch},
    Extension, Json, Router,
};
use investai_core::portfolio::{PortfolioInput, PortfolioItem, PortfolioUpdate};

use crate::{
    api::{ApiJson, ApiPath, Success},
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
};

#[utoipa::path(get, path = "/api/portfolio", responses((status = 200, description = "Holdings, newest first")))]
pub async fn list_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<PortfolioItem>>> {
    let items = state.portfolio_service.get_portfolio(&user.id)?;
    Ok(Json(items))
}

#[utoipa::path(post, path = "/api/portfolio", responses((status = 200, description = "Created holding"), (status = 400, description = "Invalid holding")))]
pub async fn add_holding(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(input): ApiJson<PortfolioInput>,
) -> ApiResult<Json<PortfolioItem>> {
    let item = state.portfolio_service.add_holding(&user.id, input).await?;
    Ok(Json(item))
}

#[utoipa::path(patch, path = "/api/portfolio/{id}", params(("id" = i32, Path, description = "Holding id")), responses((status = 200, description = "Updated holding"), (status = 404, description = "Unknown holding")))]
pub async fn update_holding(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update): ApiJson<PortfolioUpdate>,
) -> ApiResult<Json<PortfolioItem>> {
    let item = state
        .portfolio_service
        .update_holding(&user.id, id, update)
        .await?;
    Ok(Json(item))
}

#[utoipa::path(delete, path = "/api/portfolio/{id}", params(("id" = i32, Path, description = "Holding id")), responses((status = 200, description = "Removed, also when already gone")))]
pub async fn remove_holding(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Success>> {
    state.portfolio_service.remove_holding(&user.id, id).await?;
    Ok(Success::json())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(list_portfolio).post(add_holding))
        .route("/portfolio/{id}", patch(update_holding).delete(remove_holding))
}
