//! Import profile construction
//!
//! Turns the batch-level request parameters into an [`ImportProfile`] and
//! persists it. Parameter validation happens here, so a bad frequency name
//! or lifetime only surfaces once the batch produced new messages.

use chrono::{DateTime, Utc};

use crate::core::error::PushError;
use crate::core::models::{HarvestingFrequency, ImportProfile, PushParams, SourceType};
use crate::core::ports::{FrequencyLookup, MessageStore};

/// Build an import profile without persisting it
pub fn build_import_profile(
    fingerprint: i32,
    params: &PushParams,
    source_type: SourceType,
    imported: Vec<String>,
    frequencies: &dyn FrequencyLookup,
    now: DateTime<Utc>,
) -> Result<ImportProfile, PushError> {
    let harvesting_freq = match params.harvesting_freq() {
        Some(name) => frequencies.frequency(name).map_err(|e| PushError::UnsupportedParameter {
            name: "harvesting_freq",
            value: e.0,
        })?,
        None => HarvestingFrequency::Never.minutes(),
    };

    let lifetime = match params.lifetime() {
        Some(text) => text.parse::<i64>().map_err(|_| PushError::InvalidParameter {
            name: "lifetime",
            value: text.to_string(),
        })?,
        None => i64::MAX,
    };

    let screen_name = params.screen_name().map(str::to_string);
    let id_str = ImportProfile::derive_id(
        params.url(),
        screen_name.as_deref(),
        &params.client_host,
        fingerprint,
    );

    Ok(ImportProfile {
        id_str,
        client_host: params.client_host.clone(),
        imported,
        screen_name,
        harvesting_freq,
        lifetime,
        source_url: params.url().to_string(),
        source_type,
        source_hash: fingerprint,
        created_at: now,
        last_modified: now,
        last_harvested: now,
    })
}

/// Build an import profile stamped with the current time and persist it
///
/// A rejected write is reported to the store's log with the client host and
/// returned as [`PushError::Storage`].
pub fn save_import_profile(
    store: &dyn MessageStore,
    frequencies: &dyn FrequencyLookup,
    fingerprint: i32,
    params: &PushParams,
    source_type: SourceType,
    imported: Vec<String>,
) -> Result<ImportProfile, PushError> {
    let profile =
        build_import_profile(fingerprint, params, source_type, imported, frequencies, Utc::now())?;

    if !store.write_import_profile(&profile, true) {
        store.log(&format!("Error saving import profile from {}", params.client_host));
        log::error!(
            "import profile {} from {} was rejected by the store",
            profile.id_str,
            params.client_host
        );
        return Err(PushError::storage(format!(
            "unable to save import profile {}",
            profile.id_str
        )));
    }

    log::debug!("saved import profile {} ({} message(s))", profile.id_str, profile.imported.len());
    Ok(profile)
}
