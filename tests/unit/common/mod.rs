//! Shared test fixtures and helpers
//!
//! Message builders and store doubles for testing geopush components.


use geopush::core::models::RawMessage;
use serde_json::{Value, json};

/// Build a raw message from a JSON object literal
pub fn raw(value: Value) -> RawMessage {
    value.as_object().cloned().expect("fixture must be a JSON object")
}

/// A message with an explicit id at the given position and time
pub fn message(id: &str, lat: f64, lon: f64, mtime: i64, text: &str) -> RawMessage {
    raw(json!({
        "id_str": id,
        "location_point": [lat, lon],
        "mtime": mtime,
        "text": text,
    }))
}

/// A message without an id, as pushed by a client
pub fn anonymous(lat: f64, lon: f64, mtime: i64, text: &str) -> RawMessage {
    raw(json!({
        "location_point": [lat, lon],
        "mtime": mtime,
        "text": text,
    }))
}

/// Serialize a batch as a push payload
pub fn payload(batch: &[RawMessage]) -> String {
    serde_json::to_string(batch).expect("batch serializes")
}
