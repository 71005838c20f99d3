//! User and session domain models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, Result, ValidationError};

/// Sessions stay valid for a week after login.
pub const SESSION_TTL_DAYS: i64 = 7;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;

/// Domain model representing an account holder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Input model for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Username/password pair as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Check the shape of a registration request; returns the trimmed username.
    pub fn validate(&self) -> Result<String> {
        let username = self.username.trim();
        let mut errors = Vec::new();

        let len = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            errors.push(FieldError::new(
                "username",
                format!(
                    "must be between {} and {} characters",
                    USERNAME_MIN, USERNAME_MAX
                ),
            ));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            errors.push(FieldError::new(
                "password",
                format!("must be at least {} characters", PASSWORD_MIN),
            ));
        }

        if errors.is_empty() {
            Ok(username.to_string())
        } else {
            Err(ValidationError::Fields(errors).into())
        }
    }
}

/// Server-side session. Only the SHA-256 of the cookie token is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token_hash: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token_hash: String, user_id: String, now: DateTime<Utc>) -> Self {
        Self {
            token_hash,
            user_id,
            created_at: now,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
