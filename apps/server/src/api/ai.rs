use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use investai_core::assistant::{ChatRequest, ChatResponse};

use crate::{api::ApiJson, error::ApiResult, main_lib::AppState};

#[utoipa::path(post, path = "/api/ai/chat", responses((status = 200, description = "Assistant answer"), (status = 500, description = "AI provider unavailable")))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let response = state.assistant_service.chat(request).await?;
    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ai/chat", post(chat))
}
