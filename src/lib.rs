//! Client-side search and visitor fingerprinting for static sites.
//!
//! This crate provides the two browser utilities a static site needs beyond
//! its generated pages: a search box backed by a pre-built XML index, and a
//! coarse non-cryptographic visitor fingerprint. Both compile to
//! WebAssembly for the page (`wasm` feature) and to native code for the
//! build and inspection CLI.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│   index.rs   │────▶│  session.rs  │
//! │(SearchRecord)│    │ (parse_index,│     │(SearchSession│
//! │             │     │  write_index)│     │state machine)│
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │              query.rs  +  render.rs                 │
//! │   (substring scan, result-list HTML, previews)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The session never does I/O. Drivers feed it: the WASM widget fetches the
//! index over HTTP, the CLI reads it from disk, tests hand it strings. One
//! state machine, three transports.
//!
//! `fingerprint.rs` is independent of all of the above and exists to keep
//! byte-for-byte parity with fingerprints computed by the site's earlier
//! in-page script.
//!
//! # Usage
//!
//! ```ignore
//! use candela::{SearchRecord, SearchSession, write_index};
//!
//! let index = write_index(&[SearchRecord::new("Title", "body text", "/t/")]);
//!
//! let mut session = SearchSession::new();
//! session.begin_load();
//! session.complete_load(&index);
//! let hits = session.query("body");
//! ```

// Module declarations
pub mod build;
pub mod fingerprint;
pub mod index;
pub mod query;
pub mod render;
pub mod session;
pub mod testing;
pub mod types;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use fingerprint::{js_string_hash, ClientProfile};
pub use index::{parse_index, write_index, IndexError};
pub use query::{filter_records, normalize_query, record_matches};
pub use render::{
    escape_html, preview, render_failure, render_results, strip_tags, PREVIEW_MAX_CHARS,
};
pub use session::{
    resolve_url, LoadCompletion, LoadFailure, Phase, SearchSession, SessionConfig,
    DEFAULT_LOAD_TIMEOUT_MS,
};
pub use types::SearchRecord;
