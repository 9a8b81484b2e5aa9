//! Push response shaping
//!
//! Renders a [`PushReport`] as the response document returned to pushing
//! clients, optionally wrapped in a JSONP-style callback.

use serde::Serialize;

use crate::core::models::{ImportProfile, PushReport};

/// Response document for a push
#[derive(Debug, Clone, Serialize)]
pub struct PushResponse<'a> {
    /// Always `"ok"`
    pub status: &'static str,
    /// Messages seen
    pub records: usize,
    /// Messages stored for the first time
    pub new: usize,
    /// Messages already known
    pub known: usize,
    /// Messages that failed
    pub error: usize,
    /// Profile created for the batch
    #[serde(rename = "importProfile", skip_serializing_if = "Option::is_none")]
    pub import_profile: Option<&'a ImportProfile>,
    /// Always `"pushed"`
    pub message: &'static str,
}

/// Build the response document for a report
#[must_use]
pub fn response_document(report: &PushReport) -> PushResponse<'_> {
    PushResponse {
        status: "ok",
        records: report.record_count,
        new: report.new_count,
        known: report.known_count,
        error: report.error_count,
        import_profile: report.import_profile.as_ref(),
        message: "pushed",
    }
}

/// Render a report as response text
///
/// A non-empty `callback` wraps the document as `callback(<document>);`.
#[must_use]
pub fn format_response(report: &PushReport, callback: Option<&str>) -> String {
    let document = serde_json::to_string_pretty(&response_document(report)).unwrap_or_default();
    match callback.filter(|c| !c.is_empty()) {
        Some(callback) => format!("{callback}({document});"),
        None => document,
    }
}
