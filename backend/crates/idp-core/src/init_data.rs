//! Init payload adapter for the embedded mini-application.
//!
//! The raw payload arrives either as a JSON object or as a URL-form-encoded
//! string (`key=value&...`). In the form-encoded case the `user` value is
//! itself usually a JSON string and gets a second parse.
//!
//! Signatures on the payload are not checked here or anywhere else; callers
//! must treat the extracted identity as trusted input from the client.

use crate::{CoreError, ExternalIdentity, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::{Map, Value};

pub type InitPayload = Map<String, Value>;

const USER_KEY: &str = "user";
const NESTED_INIT_DATA_KEY: &str = "init_data";
const TOP_LEVEL_USER_KEYS: [&str; 6] = [
    "user_id",
    "id",
    "first_name",
    "last_name",
    "username",
    "name",
];

/// Parse a raw init payload into a key/value mapping.
#[track_caller]
pub fn parse(raw: &str) -> CoreErrorResult<InitPayload> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::malformed_payload("init data is empty"));
    }

    if raw.starts_with('{') {
        return serde_json::from_str::<InitPayload>(raw).map_err(|e| {
            CoreError::MalformedPayload {
                message: format!("malformed JSON in init data: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        });
    }

    let mut pairs = InitPayload::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let value = if key == USER_KEY {
            serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value.into_owned()))
        } else {
            Value::String(value.into_owned())
        };
        pairs.insert(key.into_owned(), value);
    }

    Ok(pairs)
}

/// Locate the user object in a parsed payload and build an identity from it.
///
/// Resolution order: `user` (object or JSON string), `init_data.user`, then a
/// user synthesised from top-level scalar fields.
#[track_caller]
pub fn extract_identity(payload: &InitPayload) -> CoreErrorResult<ExternalIdentity> {
    let user = locate_user(payload).ok_or_else(|| CoreError::NoUserInPayload {
        location: ErrorLocation::from(Location::caller()),
    })?;

    let external_id = identifier(&user, "user_id")
        .or_else(|| identifier(&user, "id"))
        .ok_or_else(|| CoreError::NoUserIdInPayload {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let first_name = scalar(&user, "first_name").or_else(|| scalar(&user, "name"));
    let last_name = scalar(&user, "last_name");

    let mut identity =
        ExternalIdentity::new(external_id).with_names(first_name.as_deref(), last_name.as_deref());
    if let Some(username) = scalar(&user, "username") {
        identity = identity.with_username(username);
    }

    Ok(identity)
}

/// Convenience for `extract_identity(&parse(raw)?)`.
#[track_caller]
pub fn identity_from_raw(raw: &str) -> CoreErrorResult<ExternalIdentity> {
    let payload = parse(raw)?;
    extract_identity(&payload)
}

fn locate_user(payload: &InitPayload) -> Option<InitPayload> {
    let direct = match payload.get(USER_KEY) {
        Some(Value::Object(user)) => Some(user.clone()),
        Some(Value::String(encoded)) => serde_json::from_str::<InitPayload>(encoded).ok(),
        _ => None,
    };
    if let Some(user) = direct.filter(|u| !u.is_empty()) {
        return Some(user);
    }

    if let Some(Value::Object(nested)) = payload.get(NESTED_INIT_DATA_KEY)
        && let Some(Value::Object(user)) = nested.get(USER_KEY)
        && !user.is_empty()
    {
        return Some(user.clone());
    }

    let synthesized: InitPayload = TOP_LEVEL_USER_KEYS
        .iter()
        .filter_map(|key| payload.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();

    if synthesized.is_empty() {
        None
    } else {
        Some(synthesized)
    }
}

/// Like [`scalar`], but a numeric zero is treated as absent.
fn identifier(object: &InitPayload, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        _ => scalar(object, key),
    }
}

/// Non-empty string form of a string or number field.
fn scalar(object: &InitPayload, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
