//! Identity REST API handlers

use crate::{
    ApiResult, AppState, BearerToken, LoginRequest, RegisterRequest, UserResponse,
    WebAppInitRequest,
};

use idp_accounts::AccessToken;

use axum::{Json, extract::State};
use log::info;

/// POST /auth/register
///
/// Create a user from an explicit username and uuid
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.accounts.register(&req.username, &req.uuid).await?;

    Ok(Json(user.into()))
}

/// POST /auth/login
///
/// Exchange a username and uuid pair for a bearer credential
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    let token = state.accounts.login(&req.username, &req.uuid).await?;

    Ok(Json(token))
}

/// POST /auth/webapp-init
///
/// Implicit login from a mini-application init payload. Provisions the user
/// when neither the webhook nor an earlier call has done so.
pub async fn webapp_init(
    State(state): State<AppState>,
    Json(req): Json<WebAppInitRequest>,
) -> ApiResult<Json<AccessToken>> {
    info!("Implicit login requested ({} bytes of init data)", req.init_data.len());
    let token = state.accounts.implicit_login(&req.init_data).await?;

    Ok(Json(token))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<UserResponse>> {
    let user = state.accounts.who_am_i(&token).await?;

    Ok(Json(user.into()))
}
