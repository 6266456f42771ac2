//! Telemetry snapshot type and JSON decoding.
//!
//! The appliance answers with a flat-ish JSON object. Some fields live in
//! nested objects (`location.country_code`, `opt_in.crash`), so lookups go
//! through a dotted path.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One decoded response from the status endpoint.
///
/// Replaced wholesale on every poll; never merged with a previous one.
pub type TelemetrySnapshot = Map<String, Value>;

/// Decode a response body into a snapshot.
///
/// Anything other than a top-level JSON object is a decode error.
pub fn parse_snapshot(body: &[u8]) -> Result<TelemetrySnapshot> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Decode(format!(
            "expected a JSON object at the top level, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Look up a field by dotted path, e.g. `"opt_in.stats"`.
///
/// Missing keys, JSON `null`, and paths that run through a non-object all
/// yield `None`.
pub fn field<'a>(snapshot: &'a TelemetrySnapshot, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = snapshot.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    (!current.is_null()).then_some(current)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
