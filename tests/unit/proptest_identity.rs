//! Property-based tests for message identity and comparison
//!
//! Uses proptest to verify properties that should hold for all inputs.

use geopush::core::models::{ImportProfile, MessageEntry, SourceType};
use geopush::core::services::compute_message_id;
use proptest::prelude::*;
use serde_json::json;

use crate::common::raw;

fn source_type() -> impl Strategy<Value = SourceType> {
    prop::sample::select(SourceType::ALL.to_vec())
}

proptest! {
    /// A caller-supplied id appears verbatim after the source type
    #[test]
    fn initial_id_is_embedded(
        id in "[A-Za-z0-9]{1,12}",
        lat in -90i32..90,
        lon in -180i32..180,
        mtime in 0i64..2_000_000_000,
        st in source_type(),
    ) {
        let message = raw(json!({"location_point": [lat, lon], "mtime": mtime}));
        let derived = compute_message_id(&message, Some(&id), st).unwrap();
        prop_assert_eq!(derived, format!("{}_{id}_{lat}_{lon}_{mtime}", st.name()));
    }

    /// Without coordinates there is no identifier
    #[test]
    fn no_id_without_location(mtime in any::<i64>(), st in source_type()) {
        let message = raw(json!({"mtime": mtime}));
        prop_assert!(compute_message_id(&message, None, st).is_err());
    }

    /// Comparison ignores the identifier and nothing else
    #[test]
    fn comparison_ignores_id(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
        text in "[ -~]{0,20}",
        other in "[ -~]{0,20}",
    ) {
        let build = |id: &str, text: &str| {
            MessageEntry::from_raw(
                raw(json!({"id_str": id, "location_point": [1, 2], "mtime": 3, "text": text})),
                SourceType::Import,
            )
            .unwrap()
        };
        prop_assert!(build(&a, &text).same_content(&build(&b, &text)));
        prop_assert_eq!(build(&a, &text).same_content(&build(&a, &other)), text == other);
    }

    /// Profile ids depend only on their inputs
    #[test]
    fn profile_id_is_idempotent(
        url in "[a-z:/.]{0,20}",
        screen in proptest::option::of("[a-z]{1,8}"),
        host in "[0-9.]{1,15}",
        hash in any::<i32>(),
    ) {
        let first = ImportProfile::derive_id(&url, screen.as_deref(), &host, hash);
        let second = ImportProfile::derive_id(&url, screen.as_deref(), &host, hash);
        prop_assert_eq!(&first, &second);
        let suffix = format!("_{hash}");
        prop_assert!(first.ends_with(&suffix));
    }
}
