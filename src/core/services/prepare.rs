//! Batch preparation
//!
//! Push front-ends decode the payload, stamp each message with its source
//! type and identifier, and drop messages whose content is already stored
//! before handing the batch to [`ingest`](super::ingest).

use serde_json::Value;

use crate::core::error::PushError;
use crate::core::models::{
    ID_FIELD, MessageEntry, RawMessage, SOURCE_TYPE_FIELD, SourceType, USER_FIELD, field_text,
};
use crate::core::ports::MessageStore;

use super::dedup::message_exists;
use super::identity::compute_message_id;

/// Caller-supplied id used as the initial id of derived identifiers
const INITIAL_ID_FIELD: &str = "id";

/// A batch ready for ingestion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedBatch {
    /// Messages to ingest, in their original order
    pub messages: Vec<RawMessage>,
    /// Messages dropped because an equal message is already stored
    pub duplicates: usize,
}

/// Decode a push payload
///
/// Accepts a JSON array of messages or an object with a `statuses` array.
pub fn decode_batch(payload: &str) -> Result<Vec<RawMessage>, PushError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| PushError::InvalidInput(format!("payload is not valid JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("statuses") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(PushError::InvalidInput(
                    "payload object has no 'statuses' array".to_string(),
                ));
            },
        },
        _ => {
            return Err(PushError::InvalidInput(
                "payload must be an array of messages".to_string(),
            ));
        },
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(message) => Ok(message),
            _ => Err(PushError::InvalidInput(format!("message #{i} is not an object"))),
        })
        .collect()
}

/// Stamp identities and drop stored duplicates
///
/// Messages whose identity cannot be derived are kept unchanged; ingestion
/// counts them as errors. A failing duplicate check keeps the message.
pub fn prepare_batch(
    store: &dyn MessageStore,
    batch: Vec<RawMessage>,
    source_type: SourceType,
    max_candidates: usize,
) -> PreparedBatch {
    let mut prepared = PreparedBatch::default();

    for mut message in batch {
        stamp_identity(&mut message, source_type);

        if is_stored_duplicate(store, &message, source_type, max_candidates) {
            prepared.duplicates += 1;
            continue;
        }
        prepared.messages.push(message);
    }

    if prepared.duplicates > 0 {
        log::info!("dropped {} already stored message(s)", prepared.duplicates);
    }
    prepared
}

/// Fill in `source_type` and `id_str` when the message carries none
///
/// The derived id uses the message's `id` field as initial id. A message
/// whose id cannot be derived is left without one.
pub fn stamp_identity(message: &mut RawMessage, source_type: SourceType) {
    let own_type = match message.get(SOURCE_TYPE_FIELD).and_then(Value::as_str) {
        Some(name) => name.parse().unwrap_or(source_type),
        None => {
            message.insert(
                SOURCE_TYPE_FIELD.to_string(),
                Value::String(source_type.name().to_string()),
            );
            source_type
        },
    };

    let has_id = match message.get(ID_FIELD) {
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    };
    if has_id {
        return;
    }

    let initial_id = message
        .get(INITIAL_ID_FIELD)
        .filter(|v| !v.is_null())
        .map(field_text);
    match compute_message_id(message, initial_id.as_deref(), own_type) {
        Ok(id) => {
            message.insert(ID_FIELD.to_string(), Value::String(id));
        },
        Err(e) => log::debug!("leaving message without id: {e}"),
    }
}

fn is_stored_duplicate(
    store: &dyn MessageStore,
    message: &RawMessage,
    source_type: SourceType,
    max_candidates: usize,
) -> bool {
    let mut probe = message.clone();
    probe.remove(USER_FIELD);
    let Ok(entry) = MessageEntry::from_raw(probe, source_type) else {
        return false;
    };

    message_exists(store, &entry, max_candidates).unwrap_or_else(|e| {
        log::warn!("duplicate check failed for {}: {e}", entry.id_str());
        false
    })
}
