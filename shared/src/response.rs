//! Response types
//!
//! The service reports failures through a conventional `error` field, on
//! error statuses and sometimes on success statuses too.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload: `{ "error": "Mesa ya reservada" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

/// Extract the server-provided error message from a response body
///
/// Reads a top-level `error` string, falling back to a `data.error` string
/// for services that wrap their bodies. Empty messages count as absent.
pub fn in_band_error(body: &Value) -> Option<String> {
    let direct = body.get("error").and_then(Value::as_str);
    let nested = || {
        body.get("data")
            .and_then(|data| data.get("error"))
            .and_then(Value::as_str)
    };
    direct
        .filter(|msg| !msg.is_empty())
        .or_else(|| nested().filter(|msg| !msg.is_empty()))
        .map(str::to_string)
}
