//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.

use crate::config::GeopushConfig;
use crate::core::models::SourceType;
use crate::core::ports::{BuiltinFrequencies, MessageStore};
use crate::core::services::{
    decode_batch, format_response, ingest, prepare_batch, source_fingerprint,
};

use super::error::ApiError;
use super::types::{PushOutcome, PushQuery, StatusData};

// =============================================================================
// STATUS
// =============================================================================

/// Health probe
#[must_use]
pub fn get_status() -> StatusData {
    StatusData {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    }
}

// =============================================================================
// PUSH
// =============================================================================

/// Resolve the source type of a push, falling back to the configured default
pub fn resolve_source_type(
    requested: Option<&str>,
    config: &GeopushConfig,
) -> Result<SourceType, ApiError> {
    match requested.filter(|name| !name.is_empty()) {
        Some(name) => name.parse().map_err(ApiError::bad_request),
        None => Ok(config.push.default_source_type),
    }
}

/// Decode, prepare and ingest a pushed batch
///
/// The payload fingerprint is taken over the raw body, so pushing the same
/// payload twice targets the same import profile. Messages dropped as
/// duplicates before ingest count as records the store already knew.
pub fn push_batch(
    store: &dyn MessageStore,
    config: &GeopushConfig,
    body: &str,
    query: &PushQuery,
    client_host: &str,
) -> Result<PushOutcome, ApiError> {
    let source_type = resolve_source_type(query.source_type.as_deref(), config)?;
    let batch = decode_batch(body)?;
    let fingerprint = source_fingerprint(body.as_bytes());

    let prepared = prepare_batch(store, batch, source_type, config.dedup.max_candidates);
    let params = query.to_params(client_host);
    let mut report = ingest(
        store,
        &BuiltinFrequencies,
        prepared.messages,
        fingerprint,
        &params,
        source_type,
    )?;
    report.record_count += prepared.duplicates;
    report.known_count += prepared.duplicates;

    Ok(PushOutcome {
        report,
        duplicates: prepared.duplicates,
    })
}

/// Push a batch and render the response document
///
/// Returns the pretty-printed document, wrapped in `callback(...);` when the
/// query names a callback.
pub fn handle_push(
    store: &dyn MessageStore,
    config: &GeopushConfig,
    body: &str,
    query: &PushQuery,
    client_host: &str,
) -> Result<String, ApiError> {
    let outcome = push_batch(store, config, body, query, client_host)?;
    Ok(format_response(&outcome.report, query.callback.as_deref()))
}
