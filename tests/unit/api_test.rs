//! Tests for the HTTP-agnostic API handlers

use geopush::adapters::InMemoryStore;
use geopush::api::{self, ApiError, ApiResponse, ErrorCode, PushQuery};
use geopush::config::GeopushConfig;
use geopush::core::models::SourceType;
use serde_json::{Value, json};

use crate::common::{anonymous, message, payload, raw};

fn parse(document: &str) -> Value {
    serde_json::from_str(document).unwrap()
}

// =============================================================================
// QUERY PARSING
// =============================================================================

#[test]
fn test_query_string_is_decoded() {
    let query = PushQuery::from_query_string(
        "source_type=geojson&screen_name=al%20ice&url=http%3A%2F%2Fx.org%2Fa.json&callback=cb&x=1",
    );
    assert_eq!(query.source_type.as_deref(), Some("geojson"));
    assert_eq!(query.screen_name.as_deref(), Some("al ice"));
    assert_eq!(query.url.as_deref(), Some("http://x.org/a.json"));
    assert_eq!(query.callback.as_deref(), Some("cb"));
    assert!(query.lifetime.is_none());
}

#[test]
fn test_query_to_params() {
    let query = PushQuery {
        harvesting_freq: Some("WEEKLY".to_string()),
        ..PushQuery::default()
    };
    let params = query.to_params("192.0.2.1");
    assert_eq!(params.client_host, "192.0.2.1");
    assert_eq!(params.harvesting_freq(), Some("WEEKLY"));
    assert_eq!(params.url(), "");
}

// =============================================================================
// PUSH
// =============================================================================

#[test]
fn test_handle_push_returns_document() {
    let store = InMemoryStore::new();
    let config = GeopushConfig::default();
    let body = payload(&[anonymous(1.0, 2.0, 3, "a"), anonymous(4.0, 5.0, 6, "b")]);

    let document =
        api::handle_push(&store, &config, &body, &PushQuery::default(), "10.1.1.1").unwrap();
    let doc = parse(&document);

    assert_eq!(doc["status"], "ok");
    assert_eq!(doc["records"], 2);
    assert_eq!(doc["new"], 2);
    assert_eq!(doc["importProfile"]["client_host"], "10.1.1.1");
    assert_eq!(doc["importProfile"]["source_type"], "IMPORT");
    assert_eq!(store.message_count(), 2);
}

#[test]
fn test_handle_push_with_callback() {
    let store = InMemoryStore::new();
    let config = GeopushConfig::default();
    let body = payload(&[anonymous(1.0, 2.0, 3, "a")]);
    let query = PushQuery {
        callback: Some("cb".to_string()),
        ..PushQuery::default()
    };

    let document = api::handle_push(&store, &config, &body, &query, "h").unwrap();
    let inner = document.strip_prefix("cb(").and_then(|d| d.strip_suffix(");")).unwrap();
    assert_eq!(parse(inner)["new"], 1);
}

#[test]
fn test_repeated_push_is_filtered_before_ingest() {
    let store = InMemoryStore::new();
    let config = GeopushConfig::default();
    let body = payload(&[anonymous(1.0, 2.0, 3, "a")]);

    api::push_batch(&store, &config, &body, &PushQuery::default(), "h").unwrap();
    let outcome = api::push_batch(&store, &config, &body, &PushQuery::default(), "h").unwrap();

    assert_eq!(outcome.duplicates, 1);
    assert_eq!(outcome.report.record_count, 1);
    assert_eq!(outcome.report.known_count, 1);
    assert_eq!(outcome.report.new_count, 0);
    assert!(outcome.report.import_profile.is_none());
}

#[test]
fn test_repeated_push_document_counts_known_records() {
    let store = InMemoryStore::new();
    let config = GeopushConfig::default();
    let body = payload(&[anonymous(1.0, 2.0, 3, "a"), anonymous(4.0, 5.0, 6, "b")]);

    api::handle_push(&store, &config, &body, &PushQuery::default(), "h").unwrap();
    let document = api::handle_push(&store, &config, &body, &PushQuery::default(), "h").unwrap();
    let doc = parse(&document);

    assert_eq!(doc["records"], 2);
    assert_eq!(doc["new"], 0);
    assert_eq!(doc["known"], 2);
    assert_eq!(doc["error"], 0);
    assert!(doc.get("importProfile").is_none());
    assert_eq!(store.message_count(), 2);
}

#[test]
fn test_explicit_id_resend_counts_as_known() {
    let store = InMemoryStore::new();
    let config = GeopushConfig::default();

    let first = payload(&[message("IMPORT_k", 1.0, 1.0, 1, "v1")]);
    api::push_batch(&store, &config, &first, &PushQuery::default(), "h").unwrap();

    let edited = payload(&[message("IMPORT_k", 1.0, 1.0, 1, "v2")]);
    let outcome = api::push_batch(&store, &config, &edited, &PushQuery::default(), "h").unwrap();
    assert_eq!(outcome.duplicates, 0);
    assert_eq!(outcome.report.known_count, 1);
}

#[test]
fn test_source_type_from_query_and_config() {
    let store = InMemoryStore::new();
    let mut config = GeopushConfig::default();
    config.push.default_source_type = SourceType::Ninux;

    let body = payload(&[anonymous(1.0, 2.0, 3, "a")]);
    let outcome = api::push_batch(&store, &config, &body, &PushQuery::default(), "h").unwrap();
    assert_eq!(outcome.report.import_profile.unwrap().source_type, SourceType::Ninux);

    let query = PushQuery {
        source_type: Some("freifunk-node".to_string()),
        ..PushQuery::default()
    };
    let body = payload(&[anonymous(7.0, 8.0, 9, "b")]);
    let outcome = api::push_batch(&store, &config, &body, &query, "h").unwrap();
    assert_eq!(outcome.report.import_profile.unwrap().source_type, SourceType::FreifunkNode);
}

#[test]
fn test_unknown_source_type_is_bad_request() {
    let store = InMemoryStore::new();
    let query = PushQuery {
        source_type: Some("carrier-pigeon".to_string()),
        ..PushQuery::default()
    };
    let err = api::handle_push(&store, &GeopushConfig::default(), "[]", &query, "h").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

#[test]
fn test_malformed_payload_is_bad_request() {
    let store = InMemoryStore::new();
    let err = api::handle_push(
        &store,
        &GeopushConfig::default(),
        r#"{"not": "a batch"}"#,
        &PushQuery::default(),
        "h",
    )
    .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_bogus_frequency_is_bad_request_without_profile() {
    let store = InMemoryStore::new();
    let query = PushQuery {
        harvesting_freq: Some("BOGUS".to_string()),
        ..PushQuery::default()
    };
    let body = payload(&[raw(json!({"location_point": [1, 1], "mtime": 1}))]);

    let err = api::handle_push(&store, &GeopushConfig::default(), &body, &query, "h").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("BOGUS"));
    assert_eq!(store.profile_count(), 0);
}

#[test]
fn test_status() {
    let status = api::get_status();
    assert_eq!(status.status, "ok");
    assert_eq!(status.version, geopush::VERSION);
}

#[test]
fn test_error_envelope() {
    let error = ApiError::bad_request("unsupported 'source_type' parameter value: nope");
    let json = serde_json::to_value(ApiResponse::error(&error)).unwrap();

    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "unsupported 'source_type' parameter value: nope");
}
