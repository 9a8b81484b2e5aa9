//! File-based message storage
//!
//! Implements `MessageStore` using JSON files in a data directory.

mod store;

pub use store::JsonFileStore;
