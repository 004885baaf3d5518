// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search session state machine.
//!
//! A session moves through at most three phases per page view:
//!
//! ```text
//!            begin_load          complete_load (parse ok)
//!   Idle ──────────────► Loading ────────────────────────► Ready
//!                           │
//!                           │  complete_load (parse error)
//!                           │  fail_load (fetch error / timeout)
//!                           ▼
//!                         Failed
//! ```
//!
//! `Ready` and `Failed` are terminal. There is no retry and no re-fetch;
//! a failed session stays failed until the page reloads. Index bodies or
//! failures that arrive in any phase but `Loading` are ignored, so a
//! stray late callback cannot clobber an established phase.
//!
//! The session itself never performs I/O. Drivers own the transport: the
//! browser widget fetches over HTTP, the CLI reads from disk, tests pass
//! strings. Whatever arrives is handed to [`SearchSession::complete_load`]
//! or [`SearchSession::fail_load`], which keeps every transition
//! synchronous and testable without an event loop.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::index::{parse_index, IndexError};
use crate::query::{normalize_query, record_matches};
use crate::types::SearchRecord;

/// How long a driver should wait for the index fetch before giving up,
/// when the config does not say otherwise.
pub const DEFAULT_LOAD_TIMEOUT_MS: u32 = 10_000;

/// Widget configuration, deserialized from the host page's camelCase
/// JSON. Every field has a working default except `indexUrl`, which the
/// page must supply; an empty URL aborts widget startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Element id of the control that shows and hides the search box.
    pub search_trigger_id: String,
    /// Element id of the collapsible wrapper toggled via the `on` class.
    pub search_wrap_id: String,
    /// Element id of the text input queries are read from.
    pub search_input_id: String,
    /// Element id of the container results are rendered into.
    pub results_container_id: String,
    /// Where to fetch the index document from.
    pub index_url: String,
    /// Fetch timeout in milliseconds. Explicit `null` disables the
    /// timeout entirely and restores wait-forever behavior.
    pub load_timeout_ms: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            search_trigger_id: "nav-search-btn".to_string(),
            search_wrap_id: "search-form-wrap".to_string(),
            search_input_id: "search-input".to_string(),
            results_container_id: "search-results".to_string(),
            index_url: String::new(),
            load_timeout_ms: Some(DEFAULT_LOAD_TIMEOUT_MS),
        }
    }
}

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No load attempted yet.
    #[default]
    Idle,
    /// A fetch is in flight; queries are no-ops.
    Loading,
    /// Index parsed; queries answer against these records.
    Ready { records: Vec<SearchRecord> },
    /// Load failed; terminal for this page view.
    Failed { failure: LoadFailure },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready { .. } => "ready",
            Phase::Failed { .. } => "failed",
        }
    }
}

/// Why a load ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The fetch errored or answered with a non-success status.
    /// `status` is `None` when no response arrived at all.
    NotFound { status: Option<u16> },
    /// The body arrived but was not a usable index document.
    Malformed { error: IndexError },
    /// The fetch outlived the configured timeout.
    TimedOut { waited_ms: u32 },
}

impl LoadFailure {
    /// The fixed message rendered into the results container. Each
    /// failure kind gets a distinct message so "the file is missing"
    /// and "the file is broken" are tellable apart from the page alone.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadFailure::NotFound { .. } => "Search index not found.",
            LoadFailure::Malformed { .. } => "Search index could not be parsed.",
            LoadFailure::TimedOut { .. } => "Search index request timed out.",
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::NotFound { status: Some(status) } => {
                write!(f, "index fetch failed with HTTP status {status}")
            }
            LoadFailure::NotFound { status: None } => {
                write!(f, "index fetch failed before a response arrived")
            }
            LoadFailure::Malformed { error } => {
                write!(f, "index rejected: {error}")
            }
            LoadFailure::TimedOut { waited_ms } => {
                write!(f, "index fetch timed out after {waited_ms} ms")
            }
        }
    }
}

/// Outcome of handing a fetched body to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadCompletion {
    /// Parsed and installed; the session is now `Ready` with this many
    /// records.
    Ready(usize),
    /// Body rejected; the session is now `Failed`.
    Rejected(IndexError),
    /// The session was not `Loading`; nothing changed.
    Ignored,
}

/// One search session. Created per page view (or per CLI invocation)
/// and never reset.
#[derive(Debug, Default)]
pub struct SearchSession {
    phase: Phase,
    // Indices into the Ready records, refreshed on every query. Indices
    // rather than clones: activation only needs the first one back.
    last_hits: Vec<usize>,
}

impl SearchSession {
    pub fn new() -> Self {
        SearchSession::default()
    }

    /// Mark the fetch as started. Returns whether a fetch should
    /// actually be issued: only the first call transitions, so a
    /// re-entrant initialization cannot fire a second request.
    pub fn begin_load(&mut self) -> bool {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Loading;
                debug!("index load started");
                true
            }
            _ => {
                warn!(phase = self.phase.name(), "load already begun; ignoring");
                false
            }
        }
    }

    /// Hand the fetched body to the session.
    ///
    /// Only meaningful while `Loading`; in any other phase the body is
    /// dropped and `Ignored` is returned, so late or duplicate fetch
    /// callbacks cannot disturb an established phase.
    pub fn complete_load(&mut self, body: &str) -> LoadCompletion {
        if self.phase != Phase::Loading {
            debug!(phase = self.phase.name(), "index body ignored");
            return LoadCompletion::Ignored;
        }
        match parse_index(body) {
            Ok(records) => {
                let count = records.len();
                debug!(records = count, "index ready");
                self.phase = Phase::Ready { records };
                LoadCompletion::Ready(count)
            }
            Err(error) => {
                warn!(%error, "index rejected");
                self.phase = Phase::Failed {
                    failure: LoadFailure::Malformed {
                        error: error.clone(),
                    },
                };
                LoadCompletion::Rejected(error)
            }
        }
    }

    /// Record a transport-level failure. Returns whether the session
    /// transitioned; failures outside `Loading` are ignored like late
    /// bodies are.
    pub fn fail_load(&mut self, failure: LoadFailure) -> bool {
        if self.phase != Phase::Loading {
            debug!(phase = self.phase.name(), "load failure ignored");
            return false;
        }
        warn!(%failure, "index load failed");
        self.phase = Phase::Failed { failure };
        true
    }

    /// Answer a keystroke. Returns matching records in index order and
    /// refreshes the activation cache.
    ///
    /// A blank query, or any phase but `Ready`, clears the cache and
    /// returns nothing.
    pub fn query(&mut self, raw: &str) -> Vec<&SearchRecord> {
        let needle = normalize_query(raw);
        if needle.is_empty() {
            self.last_hits.clear();
            return Vec::new();
        }
        let Phase::Ready { records } = &self.phase else {
            self.last_hits.clear();
            return Vec::new();
        };
        self.last_hits = records
            .iter()
            .enumerate()
            .filter(|&(_, record)| record_matches(record, &needle))
            .map(|(i, _)| i)
            .collect();
        self.last_hits.iter().map(|&i| &records[i]).collect()
    }

    /// First record of the most recent non-empty query, if any.
    pub fn top_result(&self) -> Option<&SearchRecord> {
        let Phase::Ready { records } = &self.phase else {
            return None;
        };
        self.last_hits.first().map(|&i| &records[i])
    }

    /// Absolute URL to navigate to on Enter: the top result's URL
    /// resolved against the page origin. `None` when there is nothing
    /// to activate.
    pub fn activation_target(&self, origin: &str) -> Option<String> {
        self.top_result()
            .map(|record| resolve_url(origin, &record.url))
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready { .. })
    }

    /// Number of indexed records, zero unless `Ready`.
    pub fn record_count(&self) -> usize {
        match &self.phase {
            Phase::Ready { records } => records.len(),
            _ => 0,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match &self.phase {
            Phase::Failed { failure } => Some(failure),
            _ => None,
        }
    }
}

/// Resolve `href` against a page origin the way browser navigation
/// does for the cases an index produces: scheme-qualified URLs pass
/// through, protocol-relative URLs borrow the origin's scheme, and
/// everything else is joined to the origin.
pub fn resolve_url(origin: &str, href: &str) -> String {
    if has_scheme(href) {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = origin.split("//").next().unwrap_or("https:");
        return format!("{scheme}//{rest}");
    }
    let base = origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

/// RFC 3986 scheme shape: an ASCII letter, then letters, digits, `+`,
/// `-` or `.`, then a colon.
fn has_scheme(href: &str) -> bool {
    let mut chars = href.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}
