use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use investai_core::users::{
    NewUser, Session, SessionRepositoryTrait, User, UserRepositoryTrait,
};
use investai_core::Result;

use super::model::{NewUserDB, SessionDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{sessions, users};

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(user.map(User::from))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(user.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = NewUserDB {
                    id: Uuid::new_v4().to_string(),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now().naive_utc(),
                };

                let created = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(created))
            })
            .await
    }
}

pub struct SessionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SessionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SessionRepository { pool, writer }
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    fn get_session(&self, token_hash: &str) -> Result<Option<Session>> {
        let mut conn = get_connection(&self.pool)?;
        let session = sessions::table
            .find(token_hash)
            .select(SessionDB::as_select())
            .first::<SessionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(session.map(Session::from))
    }

    async fn create_session(&self, session: Session) -> Result<Session> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Session> {
                let created = diesel::insert_into(sessions::table)
                    .values(SessionDB::from(session))
                    .returning(SessionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Session::from(created))
            })
            .await
    }

    async fn delete_session(&self, token_hash: &str) -> Result<usize> {
        let token_hash = token_hash.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(sessions::table.find(token_hash))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let now = now.naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}
