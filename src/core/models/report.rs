//! Push report model

use serde::Serialize;

use super::ImportProfile;

/// Outcome of ingesting one batch
///
/// `new_count + known_count + error_count == record_count` for every report
/// produced by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushReport {
    /// Messages seen
    pub record_count: usize,
    /// Messages stored for the first time
    pub new_count: usize,
    /// Messages the store already knew
    pub known_count: usize,
    /// Messages that could not be written
    pub error_count: usize,
    /// Profile created for the batch, present iff `new_count > 0`
    pub import_profile: Option<ImportProfile>,
}

impl PushReport {
    /// Identifiers of the newly stored messages
    #[must_use]
    pub fn imported_ids(&self) -> &[String] {
        self.import_profile.as_ref().map_or(&[][..], |p| p.imported.as_slice())
    }
}
