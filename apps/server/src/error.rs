use std::time::Duration;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use investai_core::errors::{DatabaseError, Error as CoreError, FieldError};
use serde::Serialize;
use thiserror::Error;

/// Message sent for every 5xx. Details only go to the log.
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Too many requests")]
    RateLimited { retry_after: Duration },
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldError>,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String, Vec<FieldError>) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(v) => (StatusCode::BAD_REQUEST, e.to_string(), v.field_errors()),
                CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, e.to_string(), Vec::new())
                }
                CoreError::Unauthorized(reason) => {
                    (StatusCode::UNAUTHORIZED, reason.clone(), Vec::new())
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                    Vec::new(),
                ),
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), Vec::new()),
            ApiError::Unauthorized(reason) => {
                (StatusCode::UNAUTHORIZED, reason.clone(), Vec::new())
            }
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone(), Vec::new()),
            ApiError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later".to_string(),
                Vec::new(),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                Vec::new(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            details,
        });
        let mut response = (status, body).into_response();

        if let ApiError::RateLimited { retry_after } = self {
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs.max(1)));
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
