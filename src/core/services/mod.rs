//! Business logic services
//!
//! Orchestration logic over the domain models. Services reach storage only
//! through the port traits in [`crate::core::ports`].
//!
//! - [`identity`] - derive message identifiers
//! - [`dedup`] - bounded duplicate detection
//! - [`profile`] - build and persist import profiles
//! - [`ingest`] - drive a whole batch into the store
//! - [`report`] - shape the push response document
//! - [`prepare`] - decode, stamp and filter a batch before ingestion
//! - [`fingerprint`] - source payload fingerprint

pub mod dedup;
pub mod fingerprint;
pub mod identity;
pub mod ingest;
pub mod prepare;
pub mod profile;
pub mod report;

pub use dedup::{MAX_MESSAGE_VERSIONS, message_exists};
pub use fingerprint::source_fingerprint;
pub use identity::{compose_message_id, compute_message_id};
pub use ingest::ingest;
pub use prepare::{PreparedBatch, decode_batch, prepare_batch, stamp_identity};
pub use profile::{build_import_profile, save_import_profile};
pub use report::{PushResponse, format_response, response_document};
