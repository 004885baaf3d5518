//! Enter-key activation: which result wins and what URL the page visits.

use super::common::{ready_session, sample_index_xml, TEST_ORIGIN};
use candela::{write_index, SearchRecord};

#[test]
fn enter_with_no_hits_goes_nowhere() {
    let mut session = ready_session(&sample_index_xml());

    assert!(session.query("zzz").is_empty());
    assert!(session.top_result().is_none());
    assert!(session.activation_target(TEST_ORIGIN).is_none());
}

#[test]
fn enter_picks_the_first_hit_in_index_order() {
    let mut session = ready_session(&sample_index_xml());

    session.query("alpha");
    assert_eq!(session.top_result().map(|r| r.title.as_str()), Some("Alpha Guide"));
    assert_eq!(
        session.activation_target(TEST_ORIGIN).as_deref(),
        Some("https://example.test/a")
    );
}

#[test]
fn narrowing_moves_the_activation_target() {
    let mut session = ready_session(&sample_index_xml());

    session.query("alpha");
    assert_eq!(
        session.activation_target(TEST_ORIGIN).as_deref(),
        Some("https://example.test/a")
    );

    session.query("mentioned");
    assert_eq!(
        session.activation_target(TEST_ORIGIN).as_deref(),
        Some("https://example.test/b")
    );
}

#[test]
fn clearing_the_query_clears_the_target() {
    let mut session = ready_session(&sample_index_xml());

    session.query("alpha");
    session.query("   ");
    assert!(session.top_result().is_none());
    assert!(session.activation_target(TEST_ORIGIN).is_none());
}

#[test]
fn absolute_record_urls_are_left_alone() {
    let records = vec![SearchRecord::new(
        "External",
        "lives on another host",
        "https://elsewhere.example/page",
    )];
    let mut session = ready_session(&write_index(&records));

    session.query("another host");
    assert_eq!(
        session.activation_target(TEST_ORIGIN).as_deref(),
        Some("https://elsewhere.example/page")
    );
}

#[test]
fn trailing_slash_origin_does_not_double_the_slash() {
    let mut session = ready_session(&sample_index_xml());

    session.query("gamma");
    assert_eq!(
        session.activation_target("https://example.test/").as_deref(),
        Some("https://example.test/c")
    );
}
