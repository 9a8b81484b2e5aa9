//! Output formatting for human and JSON modes
//!
//! Results can be rendered either as human-readable text or as
//! machine-parseable JSON.

use serde::Serialize;

use crate::api::PushOutcome;
use crate::core::models::ImportProfile;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a push
#[derive(Debug, Serialize)]
pub struct PushSummary {
    /// Source the batch was read from
    pub source: String,
    /// Messages that reached ingestion
    pub records: usize,
    /// Messages newly stored
    pub new: usize,
    /// Messages already stored under the same id
    pub known: usize,
    /// Messages that failed
    pub error: usize,
    /// Messages dropped before ingestion as already stored
    pub duplicates: usize,
    /// Import profile written for the batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_profile: Option<ImportProfile>,
}

impl PushSummary {
    /// Summarize a push outcome
    #[must_use]
    pub fn new(source: impl Into<String>, outcome: PushOutcome) -> Self {
        let report = outcome.report;
        Self {
            source: source.into(),
            records: report.record_count,
            new: report.new_count,
            known: report.known_count,
            error: report.error_count,
            duplicates: outcome.duplicates,
            import_profile: report.import_profile,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        println!("{}", self.format(mode));
    }

    /// Format the result based on output mode
    #[must_use]
    pub fn format(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Human => self.format_human(),
            OutputMode::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }

    fn format_human(&self) -> String {
        let mut out = format!(
            "Pushed {} record(s) from {}: {} new, {} known, {} error(s)",
            self.records, self.source, self.new, self.known, self.error
        );
        if self.duplicates > 0 {
            out.push_str(&format!("\nSkipped {} already stored message(s)", self.duplicates));
        }
        match &self.import_profile {
            Some(profile) => {
                out.push_str(&format!("\nImport profile: {}", profile.id_str));
                out.push_str(&format!("\n  imported: {}", profile.imported.len()));
                out.push_str(&format!("\n  harvesting_freq: {}", profile.harvesting_freq));
            },
            None => out.push_str("\nNo new messages, no import profile written."),
        }
        out
    }
}

/// Result of a duplicate check
#[derive(Debug, Serialize)]
pub struct ExistsResult {
    /// Identifier of the checked message
    pub id_str: String,
    /// Whether an equal message is stored
    pub exists: bool,
}

impl ExistsResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        println!("{}", self.format(mode));
    }

    /// Format the result based on output mode
    #[must_use]
    pub fn format(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Human if self.exists => format!("Already stored: {}", self.id_str),
            OutputMode::Human => format!("Not stored: {}", self.id_str),
            OutputMode::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}
