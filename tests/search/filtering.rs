//! Filtering semantics: plain substring over title and content, nothing
//! cleverer. No tokenization, no ranking, no fuzzy matching.

use super::common::{sample_index_xml, sample_records, synthetic_records, titles};
use candela::{filter_records, write_index, SearchSession};

#[test]
fn multi_word_queries_are_a_single_substring() {
    let records = sample_records();

    // "alpha mentioned" appears contiguously in Beta's content.
    assert_eq!(titles(&filter_records(&records, "alpha mentioned")), ["Beta"]);

    // Same words, other order: no contiguous occurrence, no match.
    assert!(filter_records(&records, "mentioned alpha").is_empty());
}

#[test]
fn query_trims_but_inner_whitespace_matters() {
    let records = sample_records();

    assert_eq!(
        titles(&filter_records(&records, "  alpha guide  ")),
        ["Alpha Guide"]
    );
    assert!(filter_records(&records, "alpha  guide").is_empty());
}

#[test]
fn whitespace_only_query_matches_nothing() {
    let records = sample_records();
    assert!(filter_records(&records, " \t ").is_empty());
    assert!(filter_records(&records, "").is_empty());
}

#[test]
fn punctuation_is_matched_literally() {
    let records = vec![
        candela::SearchRecord::new("C++ Notes", "templates and traits", "/cpp"),
        candela::SearchRecord::new("C Notes", "pointers", "/c"),
    ];

    assert_eq!(titles(&filter_records(&records, "c++")), ["C++ Notes"]);
}

#[test]
fn marker_tokens_match_the_expected_synthetic_slice() {
    let records = synthetic_records(50);
    let hits = filter_records(&records, "token-3");

    // Markers cycle mod 7, so token-3 lands on records 3, 10, 17, ...
    assert_eq!(hits.len(), 7);
    assert!(hits.iter().all(|r| r.content.contains("token-3")));
}

#[test]
fn session_query_agrees_with_direct_filtering() {
    let records = sample_records();
    let mut session = SearchSession::new();
    session.begin_load();
    session.complete_load(&write_index(&records));

    let via_session = titles(&session.query("alpha"));
    let direct = titles(&filter_records(&records, "alpha"));
    assert_eq!(via_session, direct);
}

#[test]
fn narrowing_and_widening_keystrokes_update_results() {
    let mut session = SearchSession::new();
    session.begin_load();
    session.complete_load(&sample_index_xml());

    // Simulates typing "al", then "alpha g", then deleting back to "a".
    assert_eq!(titles(&session.query("al")), ["Alpha Guide", "Beta"]);
    assert_eq!(titles(&session.query("alpha g")), ["Alpha Guide"]);
    assert_eq!(titles(&session.query("a")), ["Alpha Guide", "Beta", "Gamma"]);
}
