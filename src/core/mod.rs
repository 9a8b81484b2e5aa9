//! Core domain logic for geopush
//!
//! This module contains the push decision logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`MessageEntry`, `ImportProfile`, `PushReport`)
//! - `services/` - Identity, deduplication, profile and ingestion logic
//! - `ports/` - Trait definitions for the store and frequency registry
//! - `error` - The `PushError` taxonomy

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::PushError;
