#![allow(dead_code)]

//! Test infrastructure for idp-server API tests

use idp_accounts::ReconcilerConfig;
use idp_auth::TokenIssuer;
use idp_server::AppState;

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"server-test-secret-0123456789abcdefgh";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    idp_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing, with zero reconciler sleeps
pub async fn create_test_app_state() -> AppState {
    let reconciler = ReconcilerConfig {
        lookup_interval: Duration::ZERO,
        conflict_interval: Duration::ZERO,
        retry_interval: Duration::ZERO,
        ..ReconcilerConfig::default()
    };

    AppState::new(
        create_test_pool().await,
        TokenIssuer::with_hs256(TEST_SECRET, 30),
        reconciler,
    )
}

/// Send a JSON body and return the status plus decoded response body
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

/// GET with an optional raw `Authorization` header value
pub async fn get_with_auth(
    app: &Router,
    uri: &str,
    authorization: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }

    send(app, builder.body(Body::empty()).unwrap()).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    (status, json)
}
