use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::users_model::{NewUser, Session, User};
use super::users_traits::{SessionRepositoryTrait, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

pub struct UserService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    session_repository: Arc<dyn SessionRepositoryTrait>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        session_repository: Arc<dyn SessionRepositoryTrait>,
    ) -> Self {
        UserService {
            user_repository,
            session_repository,
        }
    }

    fn username_taken() -> Error {
        Error::invalid_field("username", "is already taken")
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, username: &str, password_hash: String) -> Result<User> {
        if self.user_repository.get_user_by_username(username)?.is_some() {
            return Err(Self::username_taken());
        }

        let user = self
            .user_repository
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                Error::Database(DatabaseError::UniqueViolation(_)) => Self::username_taken(),
                other => other,
            })?;

        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repository.get_user_by_username(username.trim())
    }

    async fn start_session(&self, user_id: &str, token_hash: String) -> Result<Session> {
        let now = Utc::now();
        let purged = self.session_repository.delete_expired_sessions(now).await?;
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }

        self.session_repository
            .create_session(Session::new(token_hash, user_id.to_string(), now))
            .await
    }

    async fn resolve_session(&self, token_hash: &str) -> Result<Option<User>> {
        let Some(session) = self.session_repository.get_session(token_hash)? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.session_repository.delete_session(token_hash).await?;
            return Ok(None);
        }

        match self.user_repository.get_user_by_id(&session.user_id)? {
            Some(user) => Ok(Some(user)),
            None => {
                // Session outlived its user
                self.session_repository.delete_session(token_hash).await?;
                Ok(None)
            }
        }
    }

    async fn end_session(&self, token_hash: &str) -> Result<()> {
        self.session_repository.delete_session(token_hash).await?;
        Ok(())
    }
}
