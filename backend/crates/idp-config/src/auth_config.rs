use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
    MAX_ACCESS_TOKEN_EXPIRE_MINUTES, MIN_ACCESS_TOKEN_EXPIRE_MINUTES, MIN_JWT_SECRET_LENGTH,
};

use serde::Deserialize;

/// Token signing settings. The secret is never logged.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Option<String>,
    pub access_token_expire_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.jwt_secret.as_deref() {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set IDP_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if self.access_token_expire_minutes < MIN_ACCESS_TOKEN_EXPIRE_MINUTES
            || self.access_token_expire_minutes > MAX_ACCESS_TOKEN_EXPIRE_MINUTES
        {
            return Err(ConfigError::auth(format!(
                "auth.access_token_expire_minutes must be {}-{}, got {}",
                MIN_ACCESS_TOKEN_EXPIRE_MINUTES,
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES,
                self.access_token_expire_minutes
            )));
        }

        Ok(())
    }
}
