//! Password hashing, session cookies and the session middleware.

use std::sync::Arc;

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use investai_core::users::{User, SESSION_TTL_DAYS};

use crate::error::ApiError;
use crate::main_lib::AppState;

pub const SESSION_COOKIE: &str = "investai.sid";

const TOKEN_BYTES: usize = 32;

/// The user resolved from the session cookie. Inserted by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))
}

/// `Ok(false)` on a mismatch; errors only for a malformed stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ApiError::Internal(format!("Invalid stored password hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(other) => Err(ApiError::Internal(format!(
            "Password verification failed: {other}"
        ))),
    }
}

/// Fresh opaque session token for the cookie.
pub fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Only this digest is stored server-side.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

pub fn session_cookie(token: &str, secure: bool) -> Result<HeaderValue, ApiError> {
    let max_age = SESSION_TTL_DAYS * 24 * 60 * 60;
    cookie_header(format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}{}",
        if secure { "; Secure" } else { "" }
    ))
}

pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, ApiError> {
    cookie_header(format!(
        "{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
        if secure { "; Secure" } else { "" }
    ))
}

fn cookie_header(value: String) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&value)
        .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {e}")))
}

/// Session token from the `Cookie` header(s), if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

/// Resolve the cookie to a live session user.
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, ApiError> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };
    Ok(state
        .user_service
        .resolve_session(&hash_token(&token))
        .await?)
}

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match resolve_user(&state, req.headers()).await? {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
        None => Err(ApiError::Unauthorized("Not authenticated".to_string())),
    }
}
