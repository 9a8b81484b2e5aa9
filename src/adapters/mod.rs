//! Adapter implementations for port traits
//!
//! This module contains concrete implementations of [`MessageStore`]:
//!
//! - `memory/` - lock-protected in-memory store
//! - `file/` - JSON files in a data directory, backed by the memory store
//!
//! [`MessageStore`]: crate::core::ports::MessageStore

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::{InMemoryStore, StoreSnapshot, StoredMessage};
