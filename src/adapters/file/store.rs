//! JSON file store
//!
//! Keeps the working set in an [`InMemoryStore`] and rewrites
//! `messages.json` / `profiles.json` after every accepted write.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::adapters::memory::{InMemoryStore, MessageChange, StoreSnapshot};
use crate::core::models::{ImportProfile, MessageEntry, UserEntry};
use crate::core::ports::{LocationQuery, MessageStore};

const MESSAGES_FILE: &str = "messages.json";
const PROFILES_FILE: &str = "profiles.json";

/// Message store persisted as JSON files
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    inner: InMemoryStore,
    persist_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or create) a store in `dir`
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;

        let snapshot = StoreSnapshot {
            messages: load_json(&dir.join(MESSAGES_FILE))?,
            profiles: load_json(&dir.join(PROFILES_FILE))?,
        };
        log::debug!(
            "opened store at {} ({} message(s), {} profile(s))",
            dir.display(),
            snapshot.messages.len(),
            snapshot.profiles.len()
        );

        Ok(Self {
            dir,
            inner: InMemoryStore::from_snapshot(snapshot),
            persist_lock: Mutex::new(()),
        })
    }

    /// Directory the store lives in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The in-memory working set
    #[must_use]
    pub const fn memory(&self) -> &InMemoryStore {
        &self.inner
    }

    fn persist(&self) -> anyhow::Result<()> {
        let _guard = self.persist_lock.lock().map_err(|_| anyhow!("persist lock poisoned"))?;
        let snapshot = self.inner.snapshot()?;
        save_json(&self.dir.join(MESSAGES_FILE), &snapshot.messages)?;
        save_json(&self.dir.join(PROFILES_FILE), &snapshot.profiles)?;
        Ok(())
    }
}

impl MessageStore for JsonFileStore {
    /// Only writes that change the working set are persisted. A failed
    /// persist undoes the in-memory change before returning the error.
    fn write_message(
        &self,
        message: &MessageEntry,
        user: &UserEntry,
        allow_update: bool,
        allow_overwrite: bool,
    ) -> anyhow::Result<bool> {
        let change = self.inner.apply_message(message, user, allow_update, allow_overwrite)?;
        if change == MessageChange::Unchanged {
            return Ok(false);
        }
        let created = change == MessageChange::Created;
        if let Err(e) = self.persist() {
            self.inner.revert_message(message.id_str(), change)?;
            return Err(e);
        }
        Ok(created)
    }

    fn write_import_profile(&self, profile: &ImportProfile, allow_update: bool) -> bool {
        let Some(change) = self.inner.apply_import_profile(profile, allow_update) else {
            return false;
        };
        match self.persist() {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to persist import profile {}: {e:#}", profile.id_str);
                if let Err(e) = self.inner.revert_import_profile(&profile.id_str, change) {
                    log::error!("failed to roll back import profile {}: {e:#}", profile.id_str);
                }
                false
            },
        }
    }

    fn query_messages(&self, query: &LocationQuery) -> anyhow::Result<Vec<MessageEntry>> {
        self.inner.query_messages(query)
    }

    fn log(&self, message: &str) {
        self.inner.log(message);
    }
}

fn load_json<T: DeserializeOwned + Default>(path: &Path) -> anyhow::Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
