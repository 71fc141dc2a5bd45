//! Turning raw runtime output into untyped records.

use serde_json::{Map, Value};
use tracing::warn;

/// One decoded line of runtime output. Lives only between decoding and
/// field mapping.
pub type RawRecord = Map<String, Value>;

/// Splits multi-record output into trimmed, non-empty lines, in input order.
pub fn split_records(output: &str) -> impl Iterator<Item = &str> {
    output
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Decodes a single line into a record. A line that is not a JSON object is
/// logged and skipped, never reported as an error.
pub fn decode_record(line: &str) -> Option<RawRecord> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(record)) => Some(record),
        Ok(other) => {
            warn!(
                "Skipping runtime output line {line:?}: expected a JSON object, got {}",
                kind_of(&other)
            );
            None
        }
        Err(e) => {
            warn!("Failed to parse runtime output line {line:?}: {e}");
            None
        }
    }
}

/// Reads a string field, treating missing or non-string values as empty.
pub fn str_field(record: &RawRecord, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
