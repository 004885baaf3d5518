//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::index::write_index;
use crate::types::SearchRecord;

/// Create a simple record with derived content and URL.
///
/// This is the canonical implementation used across all tests.
pub fn make_record(n: usize, title: &str) -> SearchRecord {
    SearchRecord {
        title: title.to_string(),
        content: format!("Content for {}", title),
        url: format!("/posts/{}/", n),
    }
}

/// The small fixed corpus most tests run against. "Alpha" appears in the
/// first record's title and the second record's content, so a single
/// query exercises both match paths and order preservation.
pub fn sample_records() -> Vec<SearchRecord> {
    vec![
        SearchRecord::new("Alpha Guide", "intro text", "/a"),
        SearchRecord::new("Beta", "Alpha mentioned here", "/b"),
        SearchRecord::new("Gamma", "unrelated body", "/c"),
    ]
}

/// The sample corpus serialized as an index document.
pub fn sample_index_xml() -> String {
    write_index(&sample_records())
}

/// A larger synthetic corpus for scan benchmarks and property tests.
pub fn synthetic_records(count: usize) -> Vec<SearchRecord> {
    (0..count)
        .map(|n| {
            let title = format!("Post {}", n);
            let mut record = make_record(n, &title);
            record.content = format!(
                "Body of post {} with some repeated filler words and the marker token-{}",
                n,
                n % 7
            );
            record
        })
        .collect()
}
