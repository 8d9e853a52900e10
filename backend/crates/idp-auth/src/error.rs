use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing credential {location}")]
    MissingCredential { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Token signature is invalid {location}")]
    InvalidSignature { location: ErrorLocation },

    #[error("Malformed token: {message} {location}")]
    MalformedToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed subject claim: {message} {location}")]
    MalformedSubject {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {source} {location}")]
    Signing {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token configuration invalid: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "NO_CREDENTIAL",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::TokenExpired { .. } => "CREDENTIAL_EXPIRED",
            Self::InvalidSignature { .. } => "BAD_SIGNATURE",
            Self::MalformedToken { .. } => "MALFORMED_TOKEN",
            Self::MalformedSubject { .. } => "MALFORMED_SUBJECT",
            Self::Signing { .. } => "SIGNING_FAILED",
            Self::Configuration { .. } => "AUTH_CONFIGURATION",
        }
    }

    /// Whether the caller presented a credential we refuse, as opposed to a
    /// failure on our side.
    pub fn is_credential_rejection(&self) -> bool {
        !matches!(self, Self::Signing { .. } | Self::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
