use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Malformed init payload: {message} {location}")]
    MalformedPayload {
        message: String,
        location: ErrorLocation,
    },

    #[error("No user in init payload {location}")]
    NoUserInPayload { location: ErrorLocation },

    #[error("No user id in init payload user object {location}")]
    NoUserIdInPayload { location: ErrorLocation },
}

impl CoreError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_payload<S: Into<String>>(message: S) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
