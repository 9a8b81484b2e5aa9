//! Message identity
//!
//! Identifiers have the shape `<SOURCE>_<initial id>_<lat>_<lon>_<mtime>`,
//! or `<SOURCE>_<lat>_<lon>_<mtime>` when the caller supplied no id of its
//! own. Coordinates and mtime are rendered exactly as they were sent.

use serde_json::Value;

use crate::core::error::PushError;
use crate::core::models::{LocationPoint, MTIME_FIELD, RawMessage, SourceType, field_text};

/// Derive the identifier of a raw message
///
/// Fails with [`PushError::InvalidInput`] when `location_point` or `mtime`
/// is missing, and with [`PushError::TypeMismatch`] when a coordinate is
/// neither a number nor a string.
pub fn compute_message_id(
    message: &RawMessage,
    initial_id: Option<&str>,
    source_type: SourceType,
) -> Result<String, PushError> {
    let location = LocationPoint::from_message(message)?;
    let mtime = message
        .get(MTIME_FIELD)
        .ok_or_else(|| PushError::InvalidInput(format!("{MTIME_FIELD} not found")))?;
    Ok(compose_message_id(source_type, initial_id, &location, mtime))
}

/// Assemble an identifier from already validated parts
#[must_use]
pub fn compose_message_id(
    source_type: SourceType,
    initial_id: Option<&str>,
    location: &LocationPoint,
    mtime: &Value,
) -> String {
    let (lat, lon, mtime) = (&location.latitude, &location.longitude, field_text(mtime));
    match initial_id.filter(|id| !id.is_empty()) {
        Some(id) => format!("{source_type}_{id}_{lat}_{lon}_{mtime}"),
        None => format!("{source_type}_{lat}_{lon}_{mtime}"),
    }
}
