//! Create-user response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful create-user response, passed through unmodified.
///
/// The server is expected to return an identifier and a confirmation
/// message; both are exposed through accessors but neither is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Value);

impl UserRecord {
    /// Wraps a raw JSON body.
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// The user's identifier (`userId`, falling back to `id`).
    ///
    /// Numeric identifiers are rendered as strings.
    pub fn user_id(&self) -> Option<String> {
        ["userId", "id"]
            .iter()
            .find_map(|key| self.0.get(key))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// The server's confirmation message.
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// The raw JSON body.
    pub fn body(&self) -> &Value {
        &self.0
    }

    /// Consumes the record, returning the raw JSON body.
    pub fn into_body(self) -> Value {
        self.0
    }
}
