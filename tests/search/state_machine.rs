//! Load lifecycle sequences as the browser drives them: keystrokes land
//! before, during, and after the index fetch settles.

use super::common::{failed_session, ready_session, sample_index_xml, titles};
use candela::{LoadCompletion, LoadFailure, Phase, SearchSession};

#[test]
fn idle_session_ignores_a_body_it_never_asked_for() {
    let mut session = SearchSession::new();

    let completion = session.complete_load(&sample_index_xml());
    assert_eq!(completion, LoadCompletion::Ignored);
    assert_eq!(*session.phase(), Phase::Idle);
}

#[test]
fn successful_load_reports_the_record_count() {
    let mut session = SearchSession::new();
    assert!(session.begin_load());

    let completion = session.complete_load(&sample_index_xml());
    assert_eq!(completion, LoadCompletion::Ready(3));
    assert_eq!(session.record_count(), 3);
    assert!(session.is_ready());
}

#[test]
fn rejected_body_carries_the_parse_error() {
    let mut session = SearchSession::new();
    session.begin_load();

    let completion = session.complete_load("<search><entry></entry></search>");
    match completion {
        LoadCompletion::Rejected(e) => {
            assert_eq!(e.to_string(), "entry 1 is missing <title>");
        }
        other => panic!("expected a rejection, got {:?}", other),
    }

    let failure = session.failure().expect("session should be failed");
    assert_eq!(failure.user_message(), "Search index could not be parsed.");
}

#[test]
fn keystrokes_before_arrival_yield_nothing_then_results_flow() {
    let mut session = SearchSession::new();
    session.begin_load();

    // The user starts typing while the fetch is in flight.
    assert!(session.query("alpha").is_empty());

    session.complete_load(&sample_index_xml());

    // The same keystroke now produces hits.
    assert_eq!(titles(&session.query("alpha")), ["Alpha Guide", "Beta"]);
}

#[test]
fn keystrokes_after_failure_stay_empty_forever() {
    let mut session = failed_session(LoadFailure::NotFound { status: Some(404) });

    assert!(session.query("alpha").is_empty());
    assert!(session.query("").is_empty());
    assert!(session.query("gamma").is_empty());
    assert!(!session.is_ready());
}

#[test]
fn timeout_failure_keeps_the_waited_duration() {
    let session = failed_session(LoadFailure::TimedOut { waited_ms: 10_000 });

    match session.failure() {
        Some(LoadFailure::TimedOut { waited_ms }) => assert_eq!(*waited_ms, 10_000),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

#[test]
fn sessions_do_not_share_state() {
    let mut first = ready_session(&sample_index_xml());
    let mut second = SearchSession::new();

    assert!(second.query("alpha").is_empty(), "second session is idle");
    assert_eq!(first.query("alpha").len(), 2);
    assert_eq!(*second.phase(), Phase::Idle);
}
