//! Throwaway database fixtures for repository tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

/// Migrated database in a temp directory plus a writer. Must run inside a
/// Tokio runtime; keep the `TempDir` alive for the duration of the test.
pub fn setup_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");

    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    (pool, writer, temp_dir)
}

/// Insert a user row to satisfy foreign keys; returns its id.
pub async fn create_test_user(pool: &Arc<DbPool>, writer: WriteHandle, username: &str) -> String {
    use crate::users::UserRepository;
    use investai_core::users::{NewUser, UserRepositoryTrait};

    UserRepository::new(pool.clone(), writer)
        .create_user(NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("Failed to create test user")
        .id
}
