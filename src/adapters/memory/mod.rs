//! In-memory message store
//!
//! Implements `MessageStore` with maps behind a `RwLock`. Serves as the
//! working set of the JSON file store and as a store double in tests.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock, RwLockWriteGuard};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::core::models::{ImportProfile, MessageEntry, UserEntry};
use crate::core::ports::{LocationQuery, MessageStore, Order};

/// A message with its user and creation sequence number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Creation order; later messages have larger numbers
    pub seq: u64,
    /// The message
    pub entry: MessageEntry,
    /// The user the message was pushed with
    #[serde(default, skip_serializing_if = "UserEntry::is_empty")]
    pub user: UserEntry,
}

/// Serializable contents of a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Messages in creation order
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
    /// Import profiles, ordered by id
    #[serde(default)]
    pub profiles: Vec<ImportProfile>,
}

/// Outcome of a message write
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MessageChange {
    /// The id was not stored before
    Created,
    /// An existing message or its user was replaced; holds the old value
    Updated(Box<StoredMessage>),
    /// Nothing was modified
    Unchanged,
}

/// Outcome of an accepted import profile write
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProfileChange {
    /// The id was not stored before
    Inserted,
    /// A re-import was merged into the stored profile; holds the old value
    Merged(Box<ImportProfile>),
}

#[derive(Debug, Default)]
struct State {
    messages: HashMap<String, StoredMessage>,
    profiles: HashMap<String, ImportProfile>,
    next_seq: u64,
}

/// In-memory store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
    log_lines: Mutex<Vec<String>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let next_seq = snapshot.messages.iter().map(|m| m.seq + 1).max().unwrap_or(0);
        let messages = snapshot
            .messages
            .into_iter()
            .map(|m| (m.entry.id_str().to_string(), m))
            .collect();
        let profiles = snapshot.profiles.into_iter().map(|p| (p.id_str.clone(), p)).collect();
        Self {
            state: RwLock::new(State {
                messages,
                profiles,
                next_seq,
            }),
            log_lines: Mutex::new(Vec::new()),
        }
    }

    /// Copy of the store contents
    pub fn snapshot(&self) -> anyhow::Result<StoreSnapshot> {
        let state = self.state.read().map_err(|_| anyhow!("store lock poisoned"))?;
        let mut messages: Vec<StoredMessage> = state.messages.values().cloned().collect();
        messages.sort_by_key(|m| m.seq);
        let mut profiles: Vec<ImportProfile> = state.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.id_str.cmp(&b.id_str));
        Ok(StoreSnapshot { messages, profiles })
    }

    /// Stored message by id
    #[must_use]
    pub fn message(&self, id: &str) -> Option<StoredMessage> {
        self.state.read().ok()?.messages.get(id).cloned()
    }

    /// Stored import profile by id
    #[must_use]
    pub fn profile(&self, id: &str) -> Option<ImportProfile> {
        self.state.read().ok()?.profiles.get(id).cloned()
    }

    /// Number of stored messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.state.read().map_or(0, |s| s.messages.len())
    }

    /// Number of stored import profiles
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.state.read().map_or(0, |s| s.profiles.len())
    }

    /// Lines written through [`MessageStore::log`]
    #[must_use]
    pub fn log_lines(&self) -> Vec<String> {
        self.log_lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn write_state(&self) -> anyhow::Result<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|_| anyhow!("store lock poisoned"))
    }

    /// Write a message and report what changed.
    ///
    /// Existing messages are never reported as created. With `allow_update`
    /// the stored user is filled in when it was empty; `allow_overwrite`
    /// additionally replaces the stored message and user.
    pub(crate) fn apply_message(
        &self,
        message: &MessageEntry,
        user: &UserEntry,
        allow_update: bool,
        allow_overwrite: bool,
    ) -> anyhow::Result<MessageChange> {
        let mut state = self.write_state()?;
        if let Some(existing) = state.messages.get_mut(message.id_str()) {
            if !allow_update {
                return Ok(MessageChange::Unchanged);
            }
            let replaced = if allow_overwrite {
                existing.entry != *message || existing.user != *user
            } else {
                existing.user.is_empty() && !user.is_empty()
            };
            if !replaced {
                return Ok(MessageChange::Unchanged);
            }
            let previous = existing.clone();
            if allow_overwrite {
                existing.entry = message.clone();
            }
            existing.user = user.clone();
            return Ok(MessageChange::Updated(Box::new(previous)));
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.messages.insert(
            message.id_str().to_string(),
            StoredMessage {
                seq,
                entry: message.clone(),
                user: user.clone(),
            },
        );
        Ok(MessageChange::Created)
    }

    /// Undo a change returned by [`Self::apply_message`]
    pub(crate) fn revert_message(&self, id: &str, change: MessageChange) -> anyhow::Result<()> {
        let mut state = self.write_state()?;
        match change {
            MessageChange::Created => {
                state.messages.remove(id);
            },
            MessageChange::Updated(previous) => {
                state.messages.insert(id.to_string(), *previous);
            },
            MessageChange::Unchanged => {},
        }
        Ok(())
    }

    /// Write an import profile; `None` when the profile was rejected
    pub(crate) fn apply_import_profile(
        &self,
        profile: &ImportProfile,
        allow_update: bool,
    ) -> Option<ProfileChange> {
        let mut state = self.write_state().ok()?;
        if let Some(existing) = state.profiles.get_mut(&profile.id_str) {
            if !allow_update {
                return None;
            }
            let previous = existing.clone();
            existing.merge_reimport(profile);
            return Some(ProfileChange::Merged(Box::new(previous)));
        }
        state.profiles.insert(profile.id_str.clone(), profile.clone());
        Some(ProfileChange::Inserted)
    }

    /// Undo a change returned by [`Self::apply_import_profile`]
    pub(crate) fn revert_import_profile(
        &self,
        id: &str,
        change: ProfileChange,
    ) -> anyhow::Result<()> {
        let mut state = self.write_state()?;
        match change {
            ProfileChange::Inserted => {
                state.profiles.remove(id);
            },
            ProfileChange::Merged(previous) => {
                state.profiles.insert(id.to_string(), *previous);
            },
        }
        Ok(())
    }
}

impl MessageStore for InMemoryStore {
    fn write_message(
        &self,
        message: &MessageEntry,
        user: &UserEntry,
        allow_update: bool,
        allow_overwrite: bool,
    ) -> anyhow::Result<bool> {
        let change = self.apply_message(message, user, allow_update, allow_overwrite)?;
        Ok(matches!(change, MessageChange::Created))
    }

    fn write_import_profile(&self, profile: &ImportProfile, allow_update: bool) -> bool {
        self.apply_import_profile(profile, allow_update).is_some()
    }

    fn query_messages(&self, query: &LocationQuery) -> anyhow::Result<Vec<MessageEntry>> {
        let state = self.state.read().map_err(|_| anyhow!("store lock poisoned"))?;
        let mut hits: Vec<&StoredMessage> = state
            .messages
            .values()
            .filter(|m| {
                m.entry.source_type() == query.source_type
                    && m.entry.location_point().same_point(&query.location)
            })
            .collect();
        match query.order {
            Order::NewestFirst => hits.sort_by(|a, b| b.seq.cmp(&a.seq)),
            Order::OldestFirst => hits.sort_by_key(|m| m.seq),
        }
        Ok(hits
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .map(|m| m.entry.clone())
            .collect())
    }

    fn log(&self, message: &str) {
        log::warn!(target: "geopush::store", "{message}");
        if let Ok(mut lines) = self.log_lines.lock() {
            lines.push(message.to_string());
        }
    }
}
