//! Database models for users and sessions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use investai_core::users::{Session, User};

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a user
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
        }
    }
}

/// Database model for sessions
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SessionDB {
    pub token_hash: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl From<SessionDB> for Session {
    fn from(db: SessionDB) -> Self {
        Session {
            token_hash: db.token_hash,
            user_id: db.user_id,
            created_at: db.created_at.and_utc(),
            expires_at: db.expires_at.and_utc(),
        }
    }
}

impl From<Session> for SessionDB {
    fn from(domain: Session) -> Self {
        SessionDB {
            token_hash: domain.token_hash,
            user_id: domain.user_id,
            created_at: domain.created_at.naive_utc(),
            expires_at: domain.expires_at.naive_utc(),
        }
    }
}
