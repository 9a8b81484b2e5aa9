//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the push core and the
//! systems it relies on: the message/profile store and the harvesting
//! frequency registry.
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete stores. Unit
//! tests use mock implementations; the CLI and HTTP server plug in the
//! in-memory or JSON-file stores.

mod frequency_lookup;
mod message_store;

pub use frequency_lookup::{BuiltinFrequencies, FrequencyLookup, UnrecognizedName};
#[cfg(test)]
pub use message_store::MockMessageStore;
pub use message_store::{LocationQuery, MessageStore, Order};
