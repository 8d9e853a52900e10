use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const BEARER_SCHEME: &str = "bearer";

/// Extract the token from an `Authorization: Bearer <token>` header value.
#[track_caller]
pub fn parse_bearer(header: Option<&str>) -> AuthErrorResult<&str> {
    let header = header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AuthError::MissingCredential {
            location: ErrorLocation::from(Location::caller()),
        })?;

    match header.split_once(char::is_whitespace) {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
