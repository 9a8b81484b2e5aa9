//! Tests for batch ingestion and import profiles

use geopush::adapters::InMemoryStore;
use geopush::core::PushError;
use geopush::core::models::{MessageEntry, PushParams, SourceType, UserEntry};
use geopush::core::ports::{BuiltinFrequencies, MessageStore};
use geopush::core::services::{format_response, ingest, source_fingerprint};
use serde_json::json;

use crate::common::mocks::FlakyStore;
use crate::common::{message, raw};

fn params() -> PushParams {
    PushParams {
        screen_name: Some("alice".to_string()),
        harvesting_freq: Some("daily".to_string()),
        lifetime: Some("3600".to_string()),
        url: Some("http://example.org/feed.json".to_string()),
        client_host: "10.0.0.7".to_string(),
    }
}

fn seed(store: &dyn MessageStore, id: &str, lat: f64, lon: f64, mtime: i64) {
    let entry = MessageEntry::from_raw(message(id, lat, lon, mtime, "seed"), SourceType::Import)
        .unwrap();
    assert!(store.write_message(&entry, &UserEntry::default(), true, false).unwrap());
}

// =============================================================================
// COUNTERS
// =============================================================================

#[test]
fn test_two_new_one_known() {
    let store = InMemoryStore::new();
    seed(&store, "IMPORT_stored", 1.0, 1.0, 10);

    let batch = vec![
        message("IMPORT_a", 52.5, 13.4, 100, "first"),
        message("IMPORT_b", 48.1, 11.5, 200, "second"),
        message("IMPORT_stored", 1.0, 1.0, 10, "seed"),
    ];
    let report = ingest(
        &store,
        &BuiltinFrequencies,
        batch,
        7,
        &params(),
        SourceType::Import,
    )
    .unwrap();

    assert_eq!(report.record_count, 3);
    assert_eq!(report.new_count, 2);
    assert_eq!(report.known_count, 1);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.imported_ids(), ["IMPORT_a", "IMPORT_b"]);

    let profile = report.import_profile.as_ref().unwrap();
    assert_eq!(profile.harvesting_freq, 1440);
    assert_eq!(profile.lifetime, 3600);
    assert_eq!(profile.source_hash, 7);
    assert_eq!(store.profile(&profile.id_str).as_ref(), Some(profile));
}

#[test]
fn test_counters_add_up_with_failures() {
    let store = FlakyStore::new().fail_message("IMPORT_broken");
    let batch = vec![
        message("IMPORT_ok", 1.0, 2.0, 1, "ok"),
        message("IMPORT_broken", 3.0, 4.0, 2, "fails"),
        raw(json!({"id_str": "IMPORT_nowhere", "mtime": 3})),
        message("IMPORT_ok", 1.0, 2.0, 1, "ok"),
    ];
    let report = ingest(
        &store,
        &BuiltinFrequencies,
        batch,
        0,
        &PushParams::from_host("h"),
        SourceType::Import,
    )
    .unwrap();

    assert_eq!(report.record_count, 4);
    assert_eq!(report.new_count, 1);
    assert_eq!(report.known_count, 1);
    assert_eq!(report.error_count, 2);
    assert_eq!(
        report.new_count + report.known_count + report.error_count,
        report.record_count
    );
    assert!(store.inner.log_lines().iter().any(|l| l.contains("IMPORT_broken")));
}

#[test]
fn test_empty_batch_writes_nothing() {
    let store = InMemoryStore::new();
    let report = ingest(
        &store,
        &BuiltinFrequencies,
        Vec::new(),
        0,
        &params(),
        SourceType::Twitter,
    )
    .unwrap();

    assert_eq!(report.record_count, 0);
    assert!(report.import_profile.is_none());
    assert_eq!(store.profile_count(), 0);
}

#[test]
fn test_all_known_means_no_profile() {
    let store = InMemoryStore::new();
    seed(&store, "IMPORT_x", 5.0, 6.0, 1);

    let report = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_x", 5.0, 6.0, 1, "seed")],
        0,
        &params(),
        SourceType::Import,
    )
    .unwrap();

    assert_eq!(report.known_count, 1);
    assert!(report.import_profile.is_none());
    assert_eq!(store.profile_count(), 0);
}

// =============================================================================
// USERS
// =============================================================================

#[test]
fn test_user_is_detached_and_stored() {
    let store = InMemoryStore::new();
    let mut msg = message("IMPORT_u", 1.0, 1.0, 1, "hello");
    msg.insert("user".to_string(), json!({"screen_name": "bob", "name": "Bob"}));

    ingest(
        &store,
        &BuiltinFrequencies,
        vec![msg],
        0,
        &params(),
        SourceType::Import,
    )
    .unwrap();

    let stored = store.message("IMPORT_u").unwrap();
    assert_eq!(stored.user.screen_name(), Some("bob"));
    assert!(stored.entry.field("user").is_none());
}

#[test]
fn test_user_without_screen_name_is_dropped() {
    let store = InMemoryStore::new();
    let mut msg = message("IMPORT_v", 1.0, 1.0, 1, "hello");
    msg.insert("user".to_string(), json!({"name": "nobody"}));

    let report = ingest(
        &store,
        &BuiltinFrequencies,
        vec![msg],
        0,
        &params(),
        SourceType::Import,
    )
    .unwrap();

    assert_eq!(report.new_count, 1);
    assert!(store.message("IMPORT_v").unwrap().user.is_empty());
}

// =============================================================================
// PROFILE FAILURES
// =============================================================================

#[test]
fn test_bogus_frequency_is_batch_failure() {
    let store = InMemoryStore::new();
    let mut p = params();
    p.harvesting_freq = Some("BOGUS".to_string());

    let err = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_a", 1.0, 1.0, 1, "a")],
        0,
        &p,
        SourceType::Import,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PushError::UnsupportedParameter { name: "harvesting_freq", ref value } if value == "BOGUS"
    ));
    assert_eq!(store.profile_count(), 0);
}

#[test]
fn test_non_numeric_lifetime_is_batch_failure() {
    let store = InMemoryStore::new();
    let mut p = params();
    p.lifetime = Some("forever".to_string());

    let err = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_a", 1.0, 1.0, 1, "a")],
        0,
        &p,
        SourceType::Import,
    )
    .unwrap_err();

    assert!(matches!(err, PushError::InvalidParameter { name: "lifetime", .. }));
    assert!(err.is_client_error());
}

#[test]
fn test_rejected_profile_is_storage_error() {
    let store = FlakyStore::new().reject_profiles();

    let err = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_a", 1.0, 1.0, 1, "a")],
        0,
        &params(),
        SourceType::Import,
    )
    .unwrap_err();

    assert!(matches!(err, PushError::Storage { .. }));
    assert!(store.inner.log_lines().iter().any(|l| l.contains("10.0.0.7")));
}

// =============================================================================
// RE-IMPORT
// =============================================================================

#[test]
fn test_repush_extends_the_same_profile() {
    let store = InMemoryStore::new();
    let body = "same payload";
    let fingerprint = source_fingerprint(body.as_bytes());

    let first = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_1", 1.0, 1.0, 1, "one")],
        fingerprint,
        &params(),
        SourceType::Import,
    )
    .unwrap();
    let second = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_2", 2.0, 2.0, 2, "two")],
        fingerprint,
        &params(),
        SourceType::Import,
    )
    .unwrap();

    let first_id = &first.import_profile.as_ref().unwrap().id_str;
    let second_id = &second.import_profile.as_ref().unwrap().id_str;
    assert_eq!(first_id, second_id);
    assert_eq!(store.profile_count(), 1);

    let stored = store.profile(first_id).unwrap();
    assert_eq!(stored.imported, ["IMPORT_1", "IMPORT_2"]);
    assert_eq!(stored.created_at, first.import_profile.as_ref().unwrap().created_at);
}

// =============================================================================
// RESPONSE
// =============================================================================

#[test]
fn test_response_document_from_report() {
    let store = InMemoryStore::new();
    let report = ingest(
        &store,
        &BuiltinFrequencies,
        vec![message("IMPORT_r", 1.0, 1.0, 1, "r")],
        0,
        &params(),
        SourceType::Import,
    )
    .unwrap();

    let doc: serde_json::Value = serde_json::from_str(&format_response(&report, None)).unwrap();
    assert_eq!(doc["status"], "ok");
    assert_eq!(doc["records"], 1);
    assert_eq!(doc["new"], 1);
    assert_eq!(doc["message"], "pushed");
    assert_eq!(doc["importProfile"]["imported"], json!(["IMPORT_r"]));

    let wrapped = format_response(&report, Some("cb"));
    assert!(wrapped.starts_with("cb({"));
    assert!(wrapped.ends_with("});"));
}
