use idp_auth::AuthError;
use idp_core::CoreError;
use idp_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Username already registered: {username} {location}")]
    DuplicateUsername {
        username: String,
        location: ErrorLocation,
    },

    #[error("UUID already registered {location}")]
    DuplicateUuid { location: ErrorLocation },

    /// Unknown username and wrong uuid are indistinguishable to the caller.
    #[error("Invalid credentials {location}")]
    CredentialMismatch { location: ErrorLocation },

    #[error("Credential subject {subject_id} does not resolve to a user {location}")]
    UnknownSubject {
        subject_id: i64,
        location: ErrorLocation,
    },

    #[error("Could not create or find user after {attempts} attempts {location}")]
    ProvisioningExhausted {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Auth error: {source} {location}")]
    Auth {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Core error: {source} {location}")]
    Core {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Db {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },
}

impl From<AuthError> for AccountError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AccountError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for AccountError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Db {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
