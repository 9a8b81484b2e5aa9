//! geopush - ingestion core for batches of geolocated messages
//!
//! This library derives stable message identifiers, detects already stored
//! messages, writes batches through a storage port and records an import
//! profile for every batch that added something.
//!
//! - [`core`] - domain models, ports and services
//! - [`adapters`] - in-memory and JSON file message stores
//! - [`api`] - HTTP-agnostic push handlers
//! - [`config`] - TOML configuration
//! - [`output`] - human and JSON rendering

// Warn on all clippy lints in this crate
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
