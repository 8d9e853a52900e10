use crate::ApiError;
use crate::api::error::{CREDENTIALS_REJECTED_MESSAGE, TRY_AGAIN_MESSAGE};

use idp_accounts::AccountError;
use idp_auth::AuthError;
use idp_core::CoreError;
use idp_db::DbError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::{StatusCode, header};
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_expired_token_returns_401_with_uniform_message_and_code() {
    let error: ApiError = AuthError::TokenExpired { location: here() }.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CREDENTIAL_EXPIRED");
    assert_eq!(json["error"]["message"], CREDENTIALS_REJECTED_MESSAGE);
}

#[tokio::test]
async fn test_bad_signature_and_unknown_subject_share_message() {
    let bad_signature: ApiError = AuthError::InvalidSignature { location: here() }.into();
    let unknown: ApiError = AccountError::UnknownSubject {
        subject_id: 7,
        location: here(),
    }
    .into();

    let bad_signature = body_json(bad_signature.into_response()).await;
    let unknown = body_json(unknown.into_response()).await;

    assert_eq!(bad_signature["error"]["code"], "BAD_SIGNATURE");
    assert_eq!(unknown["error"]["code"], "UNKNOWN_SUBJECT");
    assert_eq!(bad_signature["error"]["message"], unknown["error"]["message"]);
}

#[tokio::test]
async fn test_credential_mismatch_returns_401_invalid_credentials() {
    let error: ApiError = AccountError::CredentialMismatch { location: here() }.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_duplicate_username_returns_400() {
    let error: ApiError = AccountError::DuplicateUsername {
        username: "alice".into(),
        location: here(),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "DUPLICATE_USERNAME");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error: ApiError =
        AccountError::from(CoreError::validation("uuid", "uuid cannot be empty")).into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "uuid");
}

#[tokio::test]
async fn test_missing_user_in_payload_returns_400() {
    let error: ApiError = CoreError::NoUserInPayload { location: here() }.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NO_USER_IN_PAYLOAD");
}

#[tokio::test]
async fn test_provisioning_exhausted_returns_500_try_again() {
    let error: ApiError = AccountError::ProvisioningExhausted {
        attempts: 3,
        location: here(),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "PROVISIONING_FAILED");
    assert_eq!(json["error"]["message"], TRY_AGAIN_MESSAGE);
}

#[tokio::test]
async fn test_database_error_hides_details() {
    let error: ApiError = DbError::Initialization {
        message: "secret path /var/lib/identity.db".into(),
        location: here(),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json["error"]["message"].as_str().unwrap().contains("/var/lib"));
    assert!(json["error"].get("field").is_none());
}
