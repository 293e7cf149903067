//! Status check record models
//!
//! The backend under test stores "status check" records. Only the shape of
//! the responses is inspected, so records are handled as raw JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys every status check record must carry
pub const REQUIRED_FIELDS: [&str; 3] = ["id", "client_name", "timestamp"];

/// Client name submitted by the create check
pub const PROBE_CLIENT_NAME: &str = "flappy_bird_game_test";

/// Request body for `POST /api/status`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheckCreate {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

impl Default for StatusCheckCreate {
    fn default() -> Self {
        Self::new(PROBE_CLIENT_NAME)
    }
}

/// First required field absent from `record`.
///
/// A value that is not a JSON object has none of the fields.
pub fn missing_required_field(record: &Value) -> Option<&'static str> {
    let Some(object) = record.as_object() else {
        return REQUIRED_FIELDS.first().copied();
    };

    REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| !object.contains_key(*field))
}

/// Human-readable JSON type name
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
