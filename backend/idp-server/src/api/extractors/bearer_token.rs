//! Axum extractor for `Authorization: Bearer <token>`

use crate::ApiError;

use idp_auth::parse_bearer;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Raw session credential taken from the `Authorization` header.
///
/// Only the header shape is checked here; the token itself is verified by
/// the handler.
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let token = parse_bearer(header)?;
            Ok(BearerToken(token.to_string()))
        }
    }
}
