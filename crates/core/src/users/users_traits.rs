use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::users_model::{NewUser, Session, User};
use crate::errors::Result;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for session repository operations
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    fn get_session(&self, token_hash: &str) -> Result<Option<Session>>;
    async fn create_session(&self, session: Session) -> Result<Session>;
    async fn delete_session(&self, token_hash: &str) -> Result<usize>;
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Create a user; the username must be unused.
    async fn register(&self, username: &str, password_hash: String) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn start_session(&self, user_id: &str, token_hash: String) -> Result<Session>;
    /// Resolve a session token hash to its user, dropping dead sessions.
    async fn resolve_session(&self, token_hash: &str) -> Result<Option<User>>;
    async fn end_session(&self, token_hash: &str) -> Result<()>;
}
