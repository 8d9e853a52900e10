//! REST API error types
//!
//! Every failure leaves the server as `{"error": {code, message, field?}}`.
//! Credential failures share one message so a client cannot tell which check
//! rejected it; the machine code still says why.

use idp_accounts::AccountError;
use idp_auth::AuthError;
use idp_core::CoreError;
use idp_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

pub const CREDENTIALS_REJECTED_MESSAGE: &str = "Could not validate credentials";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const TRY_AGAIN_MESSAGE: &str = "Could not provision user, try again later";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "CREDENTIAL_EXPIRED")
    pub code: String,
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401, with a `WWW-Authenticate: Bearer` challenge
    #[error("Unauthorized ({code}): {message} {location}")]
    Unauthorized {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 400
    #[error("Bad request ({code}): {message} {location}")]
    BadRequest {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    /// 500, but the client may retry
    #[error("Provisioning failed: {message} {location}")]
    ProvisioningFailed {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized(code: &str, message: &str) -> Self {
        Self::Unauthorized {
            code: code.to_string(),
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(code: &str, message: S) -> Self {
        Self::BadRequest {
            code: code.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::ProvisioningFailed { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = match self {
            ApiError::Unauthorized { code, message, .. } => ApiErrorBody {
                code,
                message,
                field: None,
            },
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::BadRequest { code, message, .. } => ApiErrorBody {
                code,
                message,
                field: None,
            },
            ApiError::ProvisioningFailed { message, .. } => ApiErrorBody {
                code: "PROVISIONING_FAILED".into(),
                message,
                field: None,
            },
            ApiError::Internal { message, .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message,
                field: None,
            },
        };

        let mut response = (status, Json(ApiErrorResponse { error: body })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        if e.is_credential_rejection() {
            log::debug!("Credential rejected: {}", e);
            ApiError::unauthorized(e.error_code(), CREDENTIALS_REJECTED_MESSAGE)
        } else {
            log::error!("Token issuer failure: {}", e);
            ApiError::internal("Token operation failed")
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::MalformedPayload { message, .. } => {
                ApiError::bad_request("MALFORMED_PAYLOAD", message)
            }
            CoreError::NoUserInPayload { .. } => {
                ApiError::bad_request("NO_USER_IN_PAYLOAD", "No user in init data")
            }
            CoreError::NoUserIdInPayload { .. } => {
                ApiError::bad_request("NO_USER_ID_IN_PAYLOAD", "No user id in init data")
            }
        }
    }
}

/// Database details are logged, never returned
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Database error: {}", e);
        ApiError::internal("Database operation failed")
    }
}

impl From<AccountError> for ApiError {
    #[track_caller]
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::DuplicateUsername { .. } => {
                ApiError::bad_request("DUPLICATE_USERNAME", "Username already registered")
            }
            AccountError::DuplicateUuid { .. } => {
                ApiError::bad_request("DUPLICATE_UUID", "UUID already registered")
            }
            AccountError::CredentialMismatch { .. } => {
                ApiError::unauthorized("INVALID_CREDENTIALS", INVALID_CREDENTIALS_MESSAGE)
            }
            AccountError::UnknownSubject { subject_id, .. } => {
                log::debug!("Credential subject {} has no user", subject_id);
                ApiError::unauthorized("UNKNOWN_SUBJECT", CREDENTIALS_REJECTED_MESSAGE)
            }
            AccountError::ProvisioningExhausted { attempts, .. } => {
                log::error!("Provisioning exhausted after {} attempts", attempts);
                ApiError::ProvisioningFailed {
                    message: TRY_AGAIN_MESSAGE.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            AccountError::Auth { source, .. } => source.into(),
            AccountError::Core { source, .. } => source.into(),
            AccountError::Db { source, .. } => source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
