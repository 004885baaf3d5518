// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing the search index document.
//!
//! The index is a small XML file produced at site build time and fetched by
//! the browser widget at first focus. Its shape:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <search>
//!   <entry>
//!     <title>Getting Started</title>
//!     <content>Install the thing, then run the other thing...</content>
//!     <url>/posts/getting-started/</url>
//!   </entry>
//! </search>
//! ```
//!
//! Parsing follows DOM `textContent` semantics: every `<entry>` element in
//! the document counts, in document order, and each field's value is the
//! concatenated character data inside it. Escaped entities are resolved,
//! CDATA sections are taken literally, and nested element tags contribute
//! their text but not their markup. Whitespace is preserved as written.
//!
//! An entry missing any of the three fields makes the whole document
//! unusable. That is deliberate: a generator that emits half an entry is
//! broken, and surfacing it beats silently searching a truncated index.
//! A document with zero entries is fine; it is just an empty index.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::types::SearchRecord;

/// Element name that opens a record.
const ENTRY_TAG: &[u8] = b"entry";

/// Why an index document was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The document is not well-formed XML.
    Xml { message: String },
    /// An entry lacks one of its required child elements.
    MissingField { entry: usize, field: &'static str },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Xml { message } => {
                write!(f, "malformed index XML: {message}")
            }
            IndexError::MissingField { entry, field } => {
                write!(f, "entry {entry} is missing <{field}>")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// The three required children of an `<entry>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Content,
    Url,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"content" => Some(Field::Content),
            b"url" => Some(Field::Url),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Url => "url",
        }
    }
}

/// An entry under construction. Fields fill in as their elements close;
/// when duplicates appear the first occurrence wins, matching
/// `querySelector` picking the first match.
#[derive(Debug, Default)]
struct PartialEntry {
    title: Option<String>,
    content: Option<String>,
    url: Option<String>,
}

impl PartialEntry {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
            Field::Url => &mut self.url,
        }
    }

    fn finish(self, entry: usize) -> Result<SearchRecord, IndexError> {
        let missing = |field: Field| IndexError::MissingField {
            entry,
            field: field.name(),
        };
        Ok(SearchRecord {
            title: self.title.ok_or_else(|| missing(Field::Title))?,
            content: self.content.ok_or_else(|| missing(Field::Content))?,
            url: self.url.ok_or_else(|| missing(Field::Url))?,
        })
    }
}

/// Parse an index document into records, in document order.
///
/// Rejects ill-formed XML, documents with no root element, and any entry
/// missing a `title`, `content` or `url` child. Entry numbers in errors
/// are 1-based.
pub fn parse_index(xml: &str) -> Result<Vec<SearchRecord>, IndexError> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut current: Option<PartialEntry> = None;
    // Field currently being captured, with its accumulated text.
    let mut capture: Option<(Field, String)> = None;
    // Open nested elements inside the captured field (markup is dropped,
    // its text is kept).
    let mut markup_depth = 0usize;
    // Open unrecognized elements inside an entry (skipped entirely).
    let mut skip_depth = 0usize;
    let mut entry_no = 0usize;
    let mut saw_element = false;

    loop {
        match reader.read_event() {
            Err(err) => {
                return Err(IndexError::Xml {
                    message: err.to_string(),
                })
            }
            Ok(Event::Start(e)) => {
                saw_element = true;
                if capture.is_some() {
                    markup_depth += 1;
                } else if current.is_some() {
                    match Field::from_name(e.local_name().as_ref()) {
                        Some(field) => capture = Some((field, String::new())),
                        None => skip_depth += 1,
                    }
                } else if e.local_name().as_ref() == ENTRY_TAG {
                    entry_no += 1;
                    current = Some(PartialEntry::default());
                }
                // Any other container (the root, wrappers) carries no data.
            }
            Ok(Event::Empty(e)) => {
                saw_element = true;
                if capture.is_some() {
                    // Void markup inside a field, e.g. <br/>. No text.
                } else if let Some(entry) = current.as_mut() {
                    if let Some(field) = Field::from_name(e.local_name().as_ref()) {
                        let slot = entry.slot(field);
                        if slot.is_none() {
                            *slot = Some(String::new());
                        }
                    }
                } else if e.local_name().as_ref() == ENTRY_TAG {
                    entry_no += 1;
                    records.push(PartialEntry::default().finish(entry_no)?);
                }
            }
            Ok(Event::Text(t)) => {
                if let Some((_, buf)) = capture.as_mut() {
                    let text = t.unescape().map_err(|err| IndexError::Xml {
                        message: err.to_string(),
                    })?;
                    buf.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some((_, buf)) = capture.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if capture.is_some() && markup_depth > 0 {
                    markup_depth -= 1;
                } else if let Some((field, text)) = capture.take() {
                    if let Some(entry) = current.as_mut() {
                        let slot = entry.slot(field);
                        if slot.is_none() {
                            *slot = Some(text);
                        }
                    }
                } else if skip_depth > 0 {
                    skip_depth -= 1;
                } else if let Some(entry) = current.take() {
                    records.push(entry.finish(entry_no)?);
                }
            }
            Ok(Event::Eof) => {
                if current.is_some() || capture.is_some() {
                    return Err(IndexError::Xml {
                        message: "unexpected end of document".to_string(),
                    });
                }
                if !saw_element {
                    return Err(IndexError::Xml {
                        message: "no root element".to_string(),
                    });
                }
                return Ok(records);
            }
            // Declaration, comments, processing instructions, doctype.
            Ok(_) => {}
        }
    }
}

/// Serialize records as an index document.
///
/// The inverse of [`parse_index`] for any records: reserved characters are
/// escaped, so titles like `Fish & Chips` survive a round trip.
pub fn write_index(records: &[SearchRecord]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<search>\n");
    for record in records {
        out.push_str("  <entry>\n");
        out.push_str(&format!(
            "    <title>{}</title>\n",
            escape_xml(&record.title)
        ));
        out.push_str(&format!(
            "    <content>{}</content>\n",
            escape_xml(&record.content)
        ));
        out.push_str(&format!("    <url>{}</url>\n", escape_xml(&record.url)));
        out.push_str("  </entry>\n");
    }
    out.push_str("</search>\n");
    out
}

/// Escape the five XML-reserved characters.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
