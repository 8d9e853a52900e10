//! Startup wiring from a config directory on disk
mod common;

use idp_config::{CONFIG_DIR_ENV, Config};
use idp_server::{AppState, ServerError, build_router};

use axum::http::StatusCode;
use googletest::prelude::*;
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;

const CONFIG_TOML: &str = r#"
[database]
path = "data/identity.db"

[auth]
jwt_secret = "0123456789abcdef0123456789abcdef"
access_token_expire_minutes = 5

[provisioning]
lookup_attempts = 1
lookup_interval_ms = 0
"#;

/// Point the config loader at `dir` for the duration of a test.
struct ConfigDirGuard {
    original: Option<String>,
}

impl ConfigDirGuard {
    fn set(dir: &TempDir) -> Self {
        let original = std::env::var(CONFIG_DIR_ENV).ok();
        unsafe { std::env::set_var(CONFIG_DIR_ENV, dir.path()) };
        Self { original }
    }
}

impl Drop for ConfigDirGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(CONFIG_DIR_ENV, value),
                None => std::env::remove_var(CONFIG_DIR_ENV),
            }
        }
    }
}

#[tokio::test]
#[serial]
async fn given_config_dir_when_building_state_then_database_created_and_routes_work() {
    // Given
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), CONFIG_TOML).unwrap();
    let _guard = ConfigDirGuard::set(&dir);

    let config = Config::load().unwrap();
    config.validate().unwrap();

    // When
    let state = AppState::from_config(&config).await.unwrap();
    let app = build_router(state.clone());

    // Then
    assert_that!(dir.path().join("data/identity.db").exists(), eq(true));
    assert_that!(state.accounts.tokens().expire_minutes(), eq(5));

    let (status, token) = common::post_json(
        &app,
        "/auth/webapp-init",
        json!({"initData": r#"{"user_id": 31337, "name": "Linus"}"#}),
    )
    .await;
    assert_that!(status, eq(StatusCode::OK));
    assert_eq!(token["token_type"], "bearer");
}

#[tokio::test]
#[serial]
async fn given_config_without_secret_when_building_state_then_auth_error() {
    // Given
    let dir = TempDir::new().unwrap();
    let _guard = ConfigDirGuard::set(&dir);
    let config = Config::load().unwrap();

    // When
    let result = AppState::from_config(&config).await;

    // Then
    assert!(matches!(result, Err(ServerError::Auth(_))));
}
