use serde::{Deserialize, Serialize};

/// Identity tuple reported by the provisioning source in an init payload.
///
/// Empty strings are normalised to `None` at extraction time, so
/// `username.is_some()` means the source actually supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    pub external_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl ExternalIdentity {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            username: None,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = non_empty(username.into());
        self
    }

    pub fn with_names(mut self, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        self.first_name = first_name.and_then(|s| non_empty(s.to_string()));
        self.last_name = last_name.and_then(|s| non_empty(s.to_string()));
        self
    }

    /// Username supplied by the source, if any.
    pub fn source_username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Human-readable name: "first last", first, source username, then
    /// `user_<external_id>`.
    pub fn display_name(&self) -> String {
        match (
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.source_username(),
        ) {
            (Some(first), Some(last), _) => format!("{} {}", first, last).trim().to_string(),
            (Some(first), None, _) => first.to_string(),
            (None, _, Some(username)) => username.to_string(),
            (None, _, None) => format!("user_{}", self.external_id),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
