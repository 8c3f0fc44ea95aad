//! Request DTOs for the datastore API

use serde::Deserialize;

/// Maximum accepted key length in bytes.
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for `PUT /data`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}

impl SetRequest {
    /// Returns an error message if the request is invalid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Returns an error message if `key` cannot be stored.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Query string of `GET /data/:key`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueQuery {
    /// Returned instead of a 404 when the key is absent
    pub default: Option<String>,
}

/// Query string of the prefix endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixQuery {
    #[serde(default)]
    pub prefix: String,
}

/// Request body for `POST /render`
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub text: Option<String>,
}
