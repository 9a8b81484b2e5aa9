//! Import profile model
//!
//! An import profile records where a pushed batch came from and how the
//! source should be harvested in future. Re-importing the same source yields
//! the same profile identifier, so the stored profile is updated rather than
//! duplicated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SourceType;

/// Provenance and harvesting policy of one imported source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProfile {
    /// Derived identifier, see [`ImportProfile::derive_id`]
    pub id_str: String,

    /// Host that pushed the batch
    pub client_host: String,

    /// Identifiers of the messages this source contributed, in push order
    pub imported: Vec<String>,

    /// Account the source belongs to, if the caller named one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_name: Option<String>,

    /// Re-harvest interval in minutes
    pub harvesting_freq: i32,

    /// Lifetime of the profile in seconds
    pub lifetime: i64,

    /// URL of the source file or feed
    pub source_url: String,

    /// Kind of source
    pub source_type: SourceType,

    /// Fingerprint of the source payload
    pub source_hash: i32,

    /// When the profile was first created
    pub created_at: DateTime<Utc>,

    /// When the profile was last changed
    pub last_modified: DateTime<Utc>,

    /// When the source was last harvested
    pub last_harvested: DateTime<Utc>,
}

impl ImportProfile {
    /// Profile identifier for a source
    ///
    /// Named accounts collide on `url_screenName_hash`, anonymous pushes on
    /// `url_clientHost_hash`.
    #[must_use]
    pub fn derive_id(
        source_url: &str,
        screen_name: Option<&str>,
        client_host: &str,
        source_hash: i32,
    ) -> String {
        match screen_name.filter(|s| !s.is_empty()) {
            Some(name) => format!("{source_url}_{name}_{source_hash}"),
            None => format!("{source_url}_{client_host}_{source_hash}"),
        }
    }

    /// Fold a re-import of the same source into this profile
    ///
    /// Keeps the original creation time, appends newly imported ids that are
    /// not already listed and takes every other field from `newer`.
    pub fn merge_reimport(&mut self, newer: &Self) {
        let created_at = self.created_at;
        let mut imported = std::mem::take(&mut self.imported);
        for id in &newer.imported {
            if !imported.contains(id) {
                imported.push(id.clone());
            }
        }
        *self = newer.clone();
        self.created_at = created_at;
        self.imported = imported;
    }
}
