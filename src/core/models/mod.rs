//! Domain models for geopush
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`MessageEntry`] / [`UserEntry`] - validated message and its user
//! - [`ImportProfile`] - provenance of an imported source
//! - [`PushReport`] - per-batch accounting
//! - [`PushParams`] - batch-level request parameters
//! - [`SourceType`] / [`HarvestingFrequency`] - closed vocabularies

mod frequency;
mod message;
mod params;
mod profile;
mod report;
mod source_type;

pub use frequency::HarvestingFrequency;
pub use message::{
    Coordinate, ID_FIELD, IDENTIFIER_FIELDS, LOCATION_FIELD, LocationPoint, MTIME_FIELD,
    MessageEntry, RawMessage, SCREEN_NAME_FIELD, SOURCE_TYPE_FIELD, USER_FIELD, UserEntry,
    field_text,
};
pub use params::PushParams;
pub use profile::ImportProfile;
pub use report::PushReport;
pub use source_type::SourceType;
