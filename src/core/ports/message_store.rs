//! Message store port
//!
//! Defines the write-and-query store the push core persists into.

use crate::core::models::{ImportProfile, LocationPoint, MessageEntry, SourceType, UserEntry};

/// Ordering of query results by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Most recently created first
    #[default]
    NewestFirst,
    /// Oldest first
    OldestFirst,
}

/// Messages of one source type stored at one exact location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    /// Exact source type to match
    pub source_type: SourceType,
    /// Exact location to match
    pub location: LocationPoint,
    /// Result ordering
    pub order: Order,
    /// Results to skip
    pub offset: usize,
    /// Maximum results to return
    pub limit: usize,
}

/// Durable store for messages and import profiles
///
/// Implementations must make concurrent writes of the same message id
/// report "new" at most once.
#[cfg_attr(test, mockall::automock)]
pub trait MessageStore: Send + Sync {
    /// Write a message and its user
    ///
    /// Returns `true` iff the message was newly created. With `allow_update`
    /// an existing message is updated in place; `allow_overwrite` replaces
    /// its fields instead of merging them.
    fn write_message(
        &self,
        message: &MessageEntry,
        user: &UserEntry,
        allow_update: bool,
        allow_overwrite: bool,
    ) -> anyhow::Result<bool>;

    /// Write an import profile
    ///
    /// Returns `false` if the write was rejected.
    fn write_import_profile(&self, profile: &ImportProfile, allow_update: bool) -> bool;

    /// Find stored messages matching a location query
    fn query_messages(&self, query: &LocationQuery) -> anyhow::Result<Vec<MessageEntry>>;

    /// Best-effort diagnostic sink
    fn log(&self, message: &str) {
        log::info!(target: "geopush::store", "{message}");
    }
}
