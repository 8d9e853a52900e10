#![allow(dead_code)]

use idp_accounts::{AccountService, ReconcilerConfig};
use idp_auth::TokenIssuer;
use idp_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tempfile::TempDir;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// File-backed database in a temp dir; keep the `TempDir` alive for the test.
pub async fn create_file_pool(max_connections: u32) -> (SqlitePool, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = idp_db::connect(
        &dir.path().join("identity.db"),
        max_connections,
        Duration::from_secs(5),
    )
    .await
    .expect("Failed to open test database");

    (pool, dir)
}

/// Reconciler budgets at production counts with millisecond sleeps.
pub fn quick_reconciler_config() -> ReconcilerConfig {
    ReconcilerConfig {
        lookup_interval: Duration::from_millis(5),
        conflict_interval: Duration::from_millis(5),
        retry_interval: Duration::from_millis(5),
        ..ReconcilerConfig::default()
    }
}

pub fn account_service(pool: &SqlitePool) -> AccountService {
    AccountService::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(TokenIssuer::with_hs256(TEST_SECRET, 30)),
        quick_reconciler_config(),
    )
}
