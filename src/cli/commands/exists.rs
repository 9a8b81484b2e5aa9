//! Exists command - run the duplicate check on one message

use std::path::Path;

use anyhow::Context;

use geopush::api;
use geopush::config::GeopushConfig;
use geopush::core::models::{MessageEntry, RawMessage, USER_FIELD};
use geopush::core::services::{message_exists, stamp_identity};
use geopush::output::{ExistsResult, OutputMode};

use super::{open_store, read_payload};

/// Report whether an equal message is already stored
pub fn exists(
    file: &Path,
    source_type: Option<&str>,
    config: &GeopushConfig,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let source_type = api::resolve_source_type(source_type, config)?;
    let payload = read_payload(file)?;
    let mut message: RawMessage = serde_json::from_str(&payload)
        .with_context(|| format!("{} does not hold a JSON object", file.display()))?;

    stamp_identity(&mut message, source_type);
    message.remove(USER_FIELD);
    let entry = MessageEntry::from_raw(message, source_type)?;

    let store = open_store(config)?;
    let exists = message_exists(&store, &entry, config.dedup.max_candidates)?;

    ExistsResult {
        id_str: entry.id_str().to_string(),
        exists,
    }
    .render(mode);
    Ok(())
}
