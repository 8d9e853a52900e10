use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Session credential claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's internal id as a decimal string
    #[serde(default)]
    pub sub: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    pub fn new(subject_id: i64, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject_id.to_string(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Internal user id carried in `sub`.
    #[track_caller]
    pub fn subject_id(&self) -> AuthErrorResult<i64> {
        if self.sub.trim().is_empty() {
            return Err(AuthError::MalformedSubject {
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.sub
            .parse::<i64>()
            .map_err(|e| AuthError::MalformedSubject {
                message: format!("sub is not an integer id: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
