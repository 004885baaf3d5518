//! Tests for result-list rendering beyond the per-function cases.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::common::{sample_records, titles};
use candela::{filter_records, preview, render_results};

/// Every element the renderer emits is closed, and every piece of record
/// text is escaped, so the fragment parses as XML.
#[test]
fn test_rendered_markup_is_well_formed() {
    let records = vec![
        candela::SearchRecord::new("Tags & <angles>", "a < b > c", "/x?a=1&b=2"),
        candela::SearchRecord::new("Plain", "plain body", "/plain/"),
    ];
    let hits: Vec<&candela::SearchRecord> = records.iter().collect();
    let html = render_results(&hits);

    let mut reader = Reader::from_str(&html);
    loop {
        match reader.read_event() {
            Err(e) => panic!("rendered fragment does not parse: {}", e),
            Ok(Event::Eof) => break,
            Ok(_) => {}
        }
    }
}

#[test]
fn test_one_list_item_per_hit() {
    let records = sample_records();
    let hits = filter_records(&records, "alpha");
    assert_eq!(titles(&hits), ["Alpha Guide", "Beta"]);

    let html = render_results(&hits);
    assert_eq!(html.matches("<li class=\"search-result-item\">").count(), 2);
    assert_eq!(html.matches("</li>").count(), 2);
    assert_eq!(html.matches("<ul class=\"search-result-list\">").count(), 1);
}

#[test]
fn test_hits_render_in_hit_order() {
    let records = sample_records();
    let hits = filter_records(&records, "alpha");
    let html = render_results(&hits);

    let first = html.find("Alpha Guide").expect("first title rendered");
    let second = html.find("Beta").expect("second title rendered");
    assert!(first < second);
}

#[test]
fn test_preview_suffix_is_unconditional() {
    // Matching the page's historical behavior: even short content gets the
    // trailing ellipsis.
    assert_eq!(preview("tiny"), "tiny...");
    assert_eq!(preview(""), "...");
}

#[test]
fn test_href_with_quotes_cannot_escape_the_attribute() {
    let record = candela::SearchRecord::new(
        "Quoted",
        "body",
        "/x\" onmouseover=\"alert(1)",
    );
    let hits = vec![&record];
    let html = render_results(&hits);

    assert!(html.contains("href=\"/x&quot; onmouseover=&quot;alert(1)\""));
    assert!(!html.contains("href=\"/x\" onmouseover="));
}
