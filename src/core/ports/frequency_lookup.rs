//! Harvesting frequency port
//!
//! Resolves frequency names sent by callers to their numeric value.

use thiserror::Error;

use crate::core::models::HarvestingFrequency;

/// The name does not denote a known harvesting frequency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized harvesting frequency: {0}")]
pub struct UnrecognizedName(pub String);

/// Registry of named harvesting frequencies
pub trait FrequencyLookup: Send + Sync {
    /// Numeric frequency (minutes) for a name
    fn frequency(&self, name: &str) -> Result<i32, UnrecognizedName>;
}

/// Lookup over the built-in [`HarvestingFrequency`] names
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFrequencies;

impl FrequencyLookup for BuiltinFrequencies {
    fn frequency(&self, name: &str) -> Result<i32, UnrecognizedName> {
        name.parse::<HarvestingFrequency>()
            .map(HarvestingFrequency::minutes)
            .map_err(|_| UnrecognizedName(name.to_string()))
    }
}
