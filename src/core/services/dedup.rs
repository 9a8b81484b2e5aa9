//! Duplicate detection
//!
//! Looks for an already stored message with the same content as a candidate.
//! The check is bounded: only the newest [`MAX_MESSAGE_VERSIONS`] messages of
//! the same source type at the same location are compared, so it is a cheap
//! best-effort filter and not a uniqueness guarantee.

use crate::core::error::PushError;
use crate::core::models::MessageEntry;
use crate::core::ports::{LocationQuery, MessageStore, Order};

/// Default number of stored versions compared against a candidate
pub const MAX_MESSAGE_VERSIONS: usize = 100;

/// Whether `message` is already stored, ignoring identifiers
///
/// `message` carries its source type and location by construction; both
/// are matched exactly by the store query.
pub fn message_exists(
    store: &dyn MessageStore,
    message: &MessageEntry,
    max_candidates: usize,
) -> Result<bool, PushError> {
    let query = LocationQuery {
        source_type: message.source_type(),
        location: message.location_point().clone(),
        order: Order::NewestFirst,
        offset: 0,
        limit: max_candidates,
    };
    let candidates = store
        .query_messages(&query)
        .map_err(|e| PushError::storage_with("duplicate check query failed", e))?;

    let key = message.comparison_key();
    let found = candidates.iter().take(max_candidates).any(|c| c.comparison_key() == key);
    log::debug!(
        "duplicate check for {}: {} candidate(s), found={found}",
        message.id_str(),
        candidates.len()
    );
    Ok(found)
}
