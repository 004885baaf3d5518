//! Visitor fingerprinting from a handful of ambient browser attributes.
//!
//! This is deliberately the weak kind of fingerprint: user agent, language,
//! screen geometry and timezone offset, joined and run through a 31-multiplier
//! rolling hash. Many distinct visitors behind common configurations collide,
//! which is acceptable for coarse client differentiation and nothing more.
//! Treat it as a hint, never as a credential.
//!
//! The hash reproduces the arithmetic of the site's legacy JavaScript
//! (`((h << 5) - h) + c` with 32-bit truncation per step, which is `h * 31 + c`
//! in two's-complement), and it walks UTF-16 code units rather than Unicode
//! scalar values so the output agrees with `charCodeAt` byte for byte. A
//! profile captured in a real browser hashes to the same decimal string here,
//! which is what the `candela fingerprint` subcommand is for.

use std::future::{ready, Ready};

use serde::{Deserialize, Serialize};

/// Delimiter between joined profile attributes.
const PROFILE_DELIMITER: char = '-';

/// The ambient attributes a fingerprint is derived from.
///
/// These are read fresh on every invocation in the browser driver; nothing is
/// cached or persisted. On the native side (CLI, tests) they are supplied
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    /// Full user-agent string as reported by the environment.
    pub user_agent: String,
    /// BCP 47 language tag, e.g. `en-US`.
    pub language: String,
    /// Screen width in CSS pixels.
    pub screen_width: u32,
    /// Screen height in CSS pixels.
    pub screen_height: u32,
    /// Timezone offset in minutes, with the sign convention of
    /// JavaScript's `Date.getTimezoneOffset()` (positive = behind UTC).
    pub timezone_offset_min: i32,
}

impl ClientProfile {
    /// Join the attributes into the canonical pre-hash string:
    /// user agent, language, `{width}x{height}`, timezone offset, in that
    /// exact order, `-`-delimited.
    pub fn canonical_string(&self) -> String {
        format!(
            "{ua}{d}{lang}{d}{w}x{h}{d}{tz}",
            ua = self.user_agent,
            lang = self.language,
            w = self.screen_width,
            h = self.screen_height,
            tz = self.timezone_offset_min,
            d = PROFILE_DELIMITER,
        )
    }

    /// Compute the fingerprint: decimal string of the absolute value of the
    /// rolling hash over [`canonical_string`](Self::canonical_string).
    ///
    /// Always succeeds; every input is an always-available string or number.
    /// The result parses as an integer in `0..=2^31` (`i32::MIN` maps to
    /// `2147483648`, same as `Math.abs` on a JS 32-bit int).
    pub fn fingerprint(&self) -> String {
        js_string_hash(&self.canonical_string())
            .unsigned_abs()
            .to_string()
    }

    /// The asynchronous accessor.
    ///
    /// Computation is synchronous today, but callers get a future so the
    /// contract survives a swap to a genuinely asynchronous identity source
    /// later. Callers must not assume synchronous completion.
    pub fn resolve_fingerprint(&self) -> Ready<String> {
        ready(self.fingerprint())
    }
}

/// 32-bit rolling hash with JavaScript string semantics.
///
/// Starts at 0 and folds each UTF-16 code unit as
/// `hash = hash * 31 + unit`, wrapping in `i32` at every step. Matching the
/// UTF-16 walk matters: for non-BMP characters (emoji, some CJK extensions)
/// a scalar-value walk would diverge from `charCodeAt` and break parity with
/// fingerprints computed in the browser.
pub fn js_string_hash(value: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in value.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash
}
