//! Shared test utilities and fixtures.

#![allow(dead_code)]

use candela::{LoadCompletion, LoadFailure, SearchRecord, SearchSession};

// Re-export canonical test utilities from candela::testing
pub use candela::testing::{make_record, sample_index_xml, sample_records, synthetic_records};

/// Origin used wherever a test resolves an activation URL.
pub const TEST_ORIGIN: &str = "https://example.test";

/// Build a session that has loaded the given document. Panics if the
/// document does not parse, since every caller hands it a good one.
pub fn ready_session(xml: &str) -> SearchSession {
    let mut session = SearchSession::new();
    assert!(session.begin_load(), "fresh session should accept a load");
    match session.complete_load(xml) {
        LoadCompletion::Ready(_) => session,
        other => panic!("expected a ready session, got {:?}", other),
    }
}

/// Build a session whose load ended in the given failure.
pub fn failed_session(failure: LoadFailure) -> SearchSession {
    let mut session = SearchSession::new();
    assert!(session.begin_load());
    assert!(session.fail_load(failure));
    session
}

/// Titles of hits, for compact order assertions.
pub fn titles<'a>(hits: &[&'a SearchRecord]) -> Vec<&'a str> {
    hits.iter().map(|r| r.title.as_str()).collect()
}
