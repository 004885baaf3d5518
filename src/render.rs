// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTML rendering of search results and load failures.
//!
//! Output is a plain HTML string the driver assigns to the results
//! container. The generated markup keeps the class names the site's
//! stylesheets already target:
//!
//! ```html
//! <ul class="search-result-list">
//!   <li class="search-result-item">
//!     <a class="search-result-title" href="/posts/x/">Title</a>
//!     <p class="search-result-preview">First 150 characters...</p>
//!   </li>
//! </ul>
//! ```
//!
//! Every interpolated value is HTML-escaped. Index content is
//! semi-trusted at best (it is built from post bodies, which may embed
//! user-visible markup or pasted code), and the results container is
//! innerHTML-assigned, so unescaped interpolation would execute whatever
//! a post happens to contain.
//!
//! Previews strip markup before truncating, so a tag straddling the cut
//! point loses its markup but keeps its text. Truncating first would
//! shear tags in half and count invisible markup against the visible
//! length.

use crate::session::LoadFailure;
use crate::types::SearchRecord;

/// Visible characters kept in a result preview, before the ellipsis.
pub const PREVIEW_MAX_CHARS: usize = 150;

/// Appended to every preview, matching the site's established look.
const PREVIEW_SUFFIX: &str = "...";

/// Render matched records as a result list.
///
/// An empty slice renders as the empty string: the container is simply
/// cleared, no "no results" chrome.
pub fn render_results(hits: &[&SearchRecord]) -> String {
    if hits.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"search-result-list\">");
    for record in hits {
        html.push_str("<li class=\"search-result-item\">");
        html.push_str(&format!(
            "<a class=\"search-result-title\" href=\"{}\">{}</a>",
            escape_html(&record.url),
            escape_html(&record.title),
        ));
        html.push_str(&format!(
            "<p class=\"search-result-preview\">{}</p>",
            escape_html(&preview(&record.content)),
        ));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

/// Render a load failure as a single message paragraph.
pub fn render_failure(failure: &LoadFailure) -> String {
    format!("<p>{}</p>", escape_html(failure.user_message()))
}

/// Build the preview text for a record's content: strip markup, keep the
/// first [`PREVIEW_MAX_CHARS`] characters, append the ellipsis.
pub fn preview(content: &str) -> String {
    let mut text: String = strip_tags(content)
        .chars()
        .take(PREVIEW_MAX_CHARS)
        .collect();
    text.push_str(PREVIEW_SUFFIX);
    text
}

/// Remove tag-shaped spans: a `<`, at least one non-`>` character, then
/// `>`. Anything else, including a bare `<>` or an unterminated `<`, is
/// ordinary text and passes through.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let (before, after) = rest.split_at(start);
        out.push_str(before);
        match after[1..].find('>') {
            Some(end) if end > 0 => {
                // Skip "<...>" including both brackets.
                rest = &after[end + 2..];
            }
            _ => {
                out.push('<');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape the five HTML-reserved characters. Used on every value that
/// lands in generated markup, attribute positions included.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
