// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The record type the whole crate revolves around.
//!
//! A [`SearchRecord`] is one indexed page: what to show (`title`), what to
//! match and preview (`content`), and where to go (`url`). The index file on
//! disk is nothing but a sequence of these in document order, and the session
//! holds them in exactly that order. Match results come back in index order,
//! never re-ranked.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - All three fields are present. An index entry missing any of them fails
//!   the whole load in [`crate::index::parse_index`]; partial records are
//!   never constructed. Empty strings are "present".
//! - `content` may carry HTML. It is matched verbatim (lowercased) and
//!   tag-stripped only at render time, see [`crate::render::preview`].
//! - `url` is absolute or root-relative; resolution against the page origin
//!   happens at activation time, see [`crate::session::resolve_url`].

use serde::{Deserialize, Serialize};

/// One indexed page, as loaded from the search index file.
///
/// Serialized camelCase because these cross the JS boundary unchanged: the
/// WASM driver hands them to result callbacks, and the build CLI reads them
/// from a JSON manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    /// Display title, also matched against queries.
    pub title: String,
    /// Body text used for matching and previews. May contain HTML tags.
    pub content: String,
    /// Navigation target, absolute or root-relative.
    pub url: String,
}

impl SearchRecord {
    /// Convenience constructor for owned parts.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }
}
