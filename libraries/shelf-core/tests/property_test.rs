//! Property-based tests for the authors codec and sort parser
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use shelf_core::{authors, ListQuery, SortDirection, SortSpec};

// ===== Helpers =====

/// Author names as users type them: padded, sometimes blank, never with commas
fn arbitrary_author() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z .'-]{0,30}",
        "[ \t]{0,4}[A-Za-z]{1,12}[ \t]{0,4}",
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

fn arbitrary_authors() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arbitrary_author(), 0..12)
}

// ===== Property Tests =====

proptest! {
    /// Property: decoding an encoded list yields the normalized list
    #[test]
    fn decode_encode_round_trip(names in arbitrary_authors()) {
        let expected: Vec<String> = names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let stored = authors::encode(&names);
        prop_assert_eq!(authors::decode(stored.into()), expected.clone());
        prop_assert_eq!(authors::normalize(names), expected);
    }

    /// Property: normalized lists survive the round trip unchanged
    #[test]
    fn normalized_list_is_fixed_point(names in arbitrary_authors()) {
        let normalized = authors::normalize(names);
        let again = authors::decode(authors::encode(&normalized).into());
        prop_assert_eq!(again, normalized);
    }

    /// Property: decoded names are never blank or padded
    #[test]
    fn decoded_names_are_trimmed(raw in "[A-Za-z ,]{0,80}") {
        for name in authors::decode(raw.into()) {
            prop_assert!(!name.is_empty());
            prop_assert_eq!(name.trim(), name.as_str());
        }
    }

    /// Property: a leading '-' means descending on the remainder
    #[test]
    fn dash_prefix_is_descending(column in "[a-z_]{1,20}") {
        let spec = SortSpec::parse(&format!("-{}", column));
        prop_assert_eq!(spec.direction, SortDirection::Descending);
        prop_assert_eq!(spec.column, column);
    }

    /// Property: without '-' the whole token is the ascending column
    #[test]
    fn plain_token_is_ascending(token in "[a-z_][a-z_-]{0,20}") {
        let spec = SortSpec::parse(&token);
        prop_assert_eq!(spec.direction, SortDirection::Ascending);
        prop_assert_eq!(spec.column, token);
    }

    /// Property: the requested range always spans exactly `limit` rows
    #[test]
    fn range_spans_limit_rows(limit in 1u32..=1000, offset in 0u32..1_000_000) {
        let (start, end) = ListQuery::new(limit, offset, SortSpec::default()).range();
        prop_assert_eq!(start, u64::from(offset));
        prop_assert_eq!(end - start + 1, u64::from(limit));
    }
}
