//! Batch ingestion
//!
//! Writes every message of a batch, in order, and accounts for the outcome
//! of each write. A failing message is counted and skipped; it never aborts
//! the batch. Once the batch is through, an import profile is saved if at
//! least one message was new, and a failure there fails the whole call.

use crate::core::error::PushError;
use crate::core::models::{
    MessageEntry, PushParams, PushReport, RawMessage, SourceType, USER_FIELD, UserEntry,
};
use crate::core::ports::{FrequencyLookup, MessageStore};

use super::profile::save_import_profile;

/// What happened to one message
#[derive(Debug, Clone, PartialEq, Eq)]
enum WriteOutcome {
    /// Stored for the first time, with its id
    New(String),
    /// Already stored
    Known,
    /// Could not be validated or written
    Failed,
}

/// Running counts over a batch
#[derive(Debug, Default)]
struct Tally {
    records: usize,
    new: usize,
    known: usize,
    errors: usize,
    accepted: Vec<String>,
}

impl Tally {
    fn record(mut self, outcome: WriteOutcome) -> Self {
        self.records += 1;
        match outcome {
            WriteOutcome::New(id) => {
                self.new += 1;
                self.accepted.push(id);
            },
            WriteOutcome::Known => self.known += 1,
            WriteOutcome::Failed => self.errors += 1,
        }
        self
    }
}

/// Ingest a batch of raw messages
///
/// # Arguments
///
/// * `store` - where messages and the import profile are written
/// * `frequencies` - resolves the `harvesting_freq` parameter
/// * `batch` - messages, processed strictly in order
/// * `fingerprint` - fingerprint of the source payload
/// * `params` - batch-level request parameters
/// * `source_type` - source type for messages that carry none
///
/// # Errors
///
/// Per-message failures are counted in the report. Only import profile
/// failures (bad parameters, rejected write) are returned as errors.
pub fn ingest<I>(
    store: &dyn MessageStore,
    frequencies: &dyn FrequencyLookup,
    batch: I,
    fingerprint: i32,
    params: &PushParams,
    source_type: SourceType,
) -> Result<PushReport, PushError>
where
    I: IntoIterator<Item = RawMessage>,
{
    let tally = batch
        .into_iter()
        .map(|message| write_one(store, message, source_type))
        .fold(Tally::default(), Tally::record);

    log::info!(
        "ingested {} record(s) from {}: {} new, {} known, {} error(s)",
        tally.records,
        params.client_host,
        tally.new,
        tally.known,
        tally.errors
    );

    let import_profile = if tally.new > 0 {
        Some(save_import_profile(
            store,
            frequencies,
            fingerprint,
            params,
            source_type,
            tally.accepted,
        )?)
    } else {
        None
    };

    Ok(PushReport {
        record_count: tally.records,
        new_count: tally.new,
        known_count: tally.known,
        error_count: tally.errors,
        import_profile,
    })
}

fn write_one(store: &dyn MessageStore, mut message: RawMessage, source_type: SourceType) -> WriteOutcome {
    let user = UserEntry::from_detached(message.remove(USER_FIELD));
    let entry = match MessageEntry::from_raw(message, source_type) {
        Ok(entry) => entry,
        Err(e) => {
            log::warn!("skipping malformed message: {e}");
            return WriteOutcome::Failed;
        },
    };

    match store.write_message(&entry, &user, true, false) {
        Ok(true) => {
            log::debug!("new message {}", entry.id_str());
            WriteOutcome::New(entry.id_str().to_string())
        },
        Ok(false) => {
            log::debug!("known message {}", entry.id_str());
            WriteOutcome::Known
        },
        Err(e) => {
            log::warn!("failed to write message {}: {e:#}", entry.id_str());
            store.log(&format!("Error writing message {}: {e}", entry.id_str()));
            WriteOutcome::Failed
        },
    }
}
