use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use investai_core::users::{Credentials, User};

use crate::{
    api::{ApiJson, Success},
    auth::{
        clear_session_cookie, hash_password, hash_token, new_token, resolve_user,
        session_cookie, session_token, verify_password,
    },
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const INVALID_LOGIN: &str = "Invalid username or password";

/// Open a session for `user` and answer with the user plus its cookie.
async fn sign_in(state: &AppState, user: User) -> ApiResult<impl IntoResponse> {
    let token = new_token();
    state
        .user_service
        .start_session(&user.id, hash_token(&token))
        .await?;
    let cookie = session_cookie(&token, state.secure_cookies)?;
    Ok(([(header::SET_COOKIE, cookie)], Json(user)))
}

#[utoipa::path(post, path = "/api/auth/register", responses((status = 200, description = "Registered and signed in"), (status = 400, description = "Invalid or taken username")))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<impl IntoResponse> {
    let username = credentials.validate()?;
    let password_hash = hash_password(&credentials.password)?;
    let user = state.user_service.register(&username, password_hash).await?;
    sign_in(&state, user).await
}

#[utoipa::path(post, path = "/api/auth/login", responses((status = 200, description = "Signed in"), (status = 401, description = "Bad credentials")))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<impl IntoResponse> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user = state
        .user_service
        .find_by_username(&credentials.username)?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_LOGIN.to_string()))?;
    if !verify_password(&credentials.password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "login rejected");
        return Err(ApiError::Unauthorized(INVALID_LOGIN.to_string()));
    }

    sign_in(&state, user).await
}

#[utoipa::path(post, path = "/api/auth/logout", responses((status = 200, description = "Session ended")))]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(token) = session_token(&headers) {
        state.user_service.end_session(&hash_token(&token)).await?;
    }
    let cookie = clear_session_cookie(state.secure_cookies)?;
    Ok(([(header::SET_COOKIE, cookie)], Success::json()))
}

#[utoipa::path(get, path = "/api/auth/me", responses((status = 200, description = "Current user"), (status = 401, description = "No session")))]
pub async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<Json<User>> {
    resolve_user(&state, &headers)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}
