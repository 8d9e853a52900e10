use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

const USERS_UUID_COLUMN: &str = "users.uuid";
const USERS_USERNAME_COLUMN: &str = "users.username";

/// Column named by a uniqueness violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstrainedColumn {
    Uuid,
    Username,
    Other(String),
}

impl ConstrainedColumn {
    /// Classify from the driver message, e.g. `UNIQUE constraint failed: users.uuid`.
    pub fn from_message(message: &str) -> Self {
        let columns = message
            .split_once(':')
            .map(|(_, cols)| cols)
            .unwrap_or(message);

        if columns.contains(USERS_UUID_COLUMN) {
            Self::Uuid
        } else if columns.contains(USERS_USERNAME_COLUMN) {
            Self::Username
        } else {
            Self::Other(columns.trim().to_string())
        }
    }
}

impl fmt::Display for ConstrainedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid => write!(f, "uuid"),
            Self::Username => write!(f, "username"),
            Self::Other(column) => write!(f, "{}", column),
        }
    }
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on {column} {location}")]
    UniqueViolation {
        column: ConstrainedColumn,
        location: ErrorLocation,
    },

    #[error("{entity} not found: {id} {location}")]
    NotFound {
        entity: &'static str,
        id: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn unique_violation_on(&self) -> Option<&ConstrainedColumn> {
        match self {
            Self::UniqueViolation { column, .. } => Some(column),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation {
                    column: ConstrainedColumn::from_message(db_err.message()),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            _ => Self::Sqlx {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
