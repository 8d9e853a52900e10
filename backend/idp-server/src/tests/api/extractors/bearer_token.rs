use crate::{ApiError, BearerToken};

use axum::{body::Body, extract::FromRequestParts, http::Request};

async fn extract(request: Request<Body>) -> Result<BearerToken, ApiError> {
    let (mut parts, _body) = request.into_parts();
    BearerToken::from_request_parts(&mut parts, &()).await
}

#[tokio::test]
async fn test_extractor_with_valid_header() {
    let request = Request::builder()
        .header("Authorization", "Bearer abc.def.ghi")
        .body(Body::empty())
        .unwrap();

    let BearerToken(token) = extract(request).await.unwrap();

    assert_eq!(token, "abc.def.ghi");
}

#[tokio::test]
async fn test_extractor_without_header_rejects_with_no_credential() {
    let request = Request::builder().body(Body::empty()).unwrap();

    let result = extract(request).await;

    match result {
        Err(ApiError::Unauthorized { code, .. }) => assert_eq!(code, "NO_CREDENTIAL"),
        Err(other) => panic!("expected Unauthorized, got {:?}", other),
        Ok(_) => panic!("expected rejection"),
    }
}

#[tokio::test]
async fn test_extractor_with_basic_scheme_rejects_with_invalid_scheme() {
    let request = Request::builder()
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let result = extract(request).await;

    match result {
        Err(ApiError::Unauthorized { code, .. }) => assert_eq!(code, "INVALID_AUTH_SCHEME"),
        Err(other) => panic!("expected Unauthorized, got {:?}", other),
        Ok(_) => panic!("expected rejection"),
    }
}
