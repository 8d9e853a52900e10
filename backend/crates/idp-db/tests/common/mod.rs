#![allow(dead_code)]

use idp_core::NewUser;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// In-memory database with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    // In-memory needs a single connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    idp_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn new_user(uuid: &str, username: &str) -> NewUser {
    NewUser::new(uuid, username).expect("valid test user")
}
