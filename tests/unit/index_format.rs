//! Tests for index parsing against the messier documents generators emit.

use super::common::synthetic_records;
use candela::{parse_index, write_index, IndexError};

#[test]
fn test_comments_inside_fields_are_dropped() {
    let xml = r#"<search>
        <entry>
            <title>Be<!-- inline note -->fore</title>
            <content>body</content>
            <url>/a</url>
        </entry>
    </search>"#;

    let records = parse_index(xml).expect("comments are not content");
    assert_eq!(records[0].title, "Before");
}

#[test]
fn test_declaration_and_doctype_are_skipped() {
    let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
               <!DOCTYPE search>\n\
               <search><entry><title>T</title><content>C</content><url>/u</url></entry></search>";

    let records = parse_index(xml).expect("prolog is not content");
    assert_eq!(records.len(), 1);
}

#[test]
fn test_unknown_siblings_between_entries_are_ignored() {
    let xml = r#"<search>
        <generated>2026-08-25</generated>
        <entry><title>A</title><content>a</content><url>/a</url></entry>
        <meta><count>1</count></meta>
        <entry><title>B</title><content>b</content><url>/b</url></entry>
    </search>"#;

    let records = parse_index(xml).expect("unknown siblings are skipped");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "A");
    assert_eq!(records[1].title, "B");
}

#[test]
fn test_fields_accepted_in_any_order() {
    let xml = r#"<search>
        <entry>
            <url>/late-title</url>
            <content>content first</content>
            <title>Late Title</title>
        </entry>
    </search>"#;

    let records = parse_index(xml).expect("field order is free");
    assert_eq!(records[0].title, "Late Title");
    assert_eq!(records[0].url, "/late-title");
}

#[test]
fn test_attributes_are_ignored() {
    let xml = r#"<search version="2">
        <entry id="7" draft="false">
            <title lang="en">Attributed</title>
            <content>body</content>
            <url>/attr</url>
        </entry>
    </search>"#;

    let records = parse_index(xml).expect("attributes carry no index data");
    assert_eq!(records[0].title, "Attributed");
}

#[test]
fn test_undefined_entity_is_rejected() {
    let xml = "<search><entry><title>bad &nosuch; entity</title>\
               <content>c</content><url>/u</url></entry></search>";

    match parse_index(xml) {
        Err(IndexError::Xml { .. }) => {}
        other => panic!("expected an XML error, got {:?}", other),
    }
}

#[test]
fn test_large_synthetic_index_round_trips() {
    let records = synthetic_records(200);
    let xml = write_index(&records);
    let reparsed = parse_index(&xml).expect("emitted index parses");
    assert_eq!(reparsed, records);
}
