// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query matching.
//!
//! Matching is a case-insensitive substring scan over each record's title
//! and content, in document order. No tokenization, no ranking, no scoring:
//! for the few hundred entries a static site produces, a linear scan per
//! keystroke is instant, and "contains what I typed" is exactly the mental
//! model readers have.
//!
//! Both sides are normalized the same way: trimmed, then lowercased. A
//! blank query matches nothing rather than everything, so an empty search
//! box shows an empty result list.

use crate::types::SearchRecord;

/// Normalize a raw query: trim surrounding whitespace, lowercase the rest.
///
/// An all-whitespace query normalizes to the empty string, which matches
/// nothing.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether `record` matches an already-normalized, non-empty needle.
///
/// Title and content are each trimmed and lowercased before the substring
/// test; the URL is never searched.
pub fn record_matches(record: &SearchRecord, needle: &str) -> bool {
    let title = record.title.trim().to_lowercase();
    let content = record.content.trim().to_lowercase();
    title.contains(needle) || content.contains(needle)
}

/// Filter records by a raw query, preserving document order.
///
/// Returns borrowed records; nothing is cloned. A query that normalizes to
/// the empty string returns no matches.
pub fn filter_records<'a>(records: &'a [SearchRecord], raw: &str) -> Vec<&'a SearchRecord> {
    let needle = normalize_query(raw);
    if needle.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}
