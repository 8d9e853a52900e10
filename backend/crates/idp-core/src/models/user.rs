use crate::{CoreError, Result as CoreErrorResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user identity.
///
/// `id` is assigned by the store and never changes. `uuid` is the external
/// identifier supplied by the provisioning source and is unique across rows,
/// as is `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub uuid: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a user row. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: String,
    pub username: String,
}

impl NewUser {
    #[track_caller]
    pub fn new(uuid: &str, username: &str) -> CoreErrorResult<Self> {
        let uuid = uuid.trim();
        let username = username.trim();

        if uuid.is_empty() {
            return Err(CoreError::validation("uuid", "uuid cannot be empty"));
        }
        if username.is_empty() {
            return Err(CoreError::validation(
                "username",
                "username cannot be empty",
            ));
        }

        Ok(Self {
            uuid: uuid.to_string(),
            username: username.to_string(),
        })
    }
}
