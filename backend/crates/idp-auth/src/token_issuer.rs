use crate::{AuthError, Claims, JwtValidator, Result as AuthErrorResult};

use idp_config::AuthConfig;

use std::panic::Location;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Mints and verifies session credentials with a single HS256 secret.
///
/// Any instance built from the same secret can verify tokens issued by any
/// other; nothing is persisted.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    validator: JwtValidator,
    expire_minutes: i64,
}

impl TokenIssuer {
    pub fn with_hs256(secret: &[u8], expire_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            validator: JwtValidator::with_hs256(secret),
            expire_minutes,
        }
    }

    #[track_caller]
    pub fn from_config(config: &AuthConfig) -> AuthErrorResult<Self> {
        let secret = config
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AuthError::Configuration {
                message: "auth.jwt_secret is not set".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self::with_hs256(
            secret.as_bytes(),
            config.access_token_expire_minutes,
        ))
    }

    pub fn expire_minutes(&self) -> i64 {
        self.expire_minutes
    }

    /// Issue a credential for `subject_id` with the configured expiry.
    #[track_caller]
    pub fn issue(&self, subject_id: i64) -> AuthErrorResult<String> {
        self.issue_with_expiry(subject_id, self.expire_minutes)
    }

    /// Issue a credential expiring `expire_minutes` from now. Negative values
    /// produce an already-expired credential.
    #[track_caller]
    pub fn issue_with_expiry(
        &self,
        subject_id: i64,
        expire_minutes: i64,
    ) -> AuthErrorResult<String> {
        let now = Utc::now();
        let claims = Claims::new(
            subject_id,
            now.timestamp(),
            (now + Duration::minutes(expire_minutes)).timestamp(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|source| {
            AuthError::Signing {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        self.validator.validate(token)
    }
}
