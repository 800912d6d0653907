// Tests for the streaming dump reader

use std::io::Write;
use tempfile::NamedTempFile;
use zidgraph_dump::{DumpError, DumpReader, RawPage};

const EXPORT_HEADER: &str = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.11/" version="0.11" xml:lang="en">
  <siteinfo>
    <sitename>Wikifunctions</sitename>
  </siteinfo>
"#;

fn export(pages: &str) -> String {
    format!("{EXPORT_HEADER}{pages}</mediawiki>\n")
}

fn read_all(xml: &str) -> Vec<RawPage> {
    DumpReader::new(xml.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

// ============================================================================
// Page Extraction Tests
// ============================================================================

#[test]
fn test_reads_title_id_and_text() {
    let xml = export(
        r#"  <page>
    <title>Z10001</title>
    <ns>0</ns>
    <id>4242</id>
    <revision>
      <id>90001</id>
      <text bytes="42" xml:space="preserve">{&quot;Z1K1&quot;: &quot;Z2&quot;}</text>
    </revision>
  </page>
"#,
    );

    let pages = read_all(&xml);

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "Z10001");
    assert_eq!(pages[0].id.as_deref(), Some("4242"));
    assert_eq!(pages[0].text.as_deref(), Some(r#"{"Z1K1": "Z2"}"#));
}

#[test]
fn test_reads_multiple_pages_in_order() {
    let xml = export(
        "<page><title>Z1</title><id>1</id></page>\
         <page><title>Main Page</title><id>2</id></page>\
         <page><title>Z3</title><id>3</id></page>",
    );

    let titles: Vec<String> = read_all(&xml).into_iter().map(|p| p.title).collect();

    assert_eq!(titles, vec!["Z1", "Main Page", "Z3"]);
}

#[test]
fn test_self_closing_text_is_absent() {
    let xml = export(
        r#"<page><title>Z5</title><id>5</id><revision><text bytes="0" /></revision></page>"#,
    );

    let pages = read_all(&xml);

    assert_eq!(pages[0].text, None);
    assert!(!pages[0].has_text());
}

#[test]
fn test_empty_text_element_is_absent() {
    let xml = export("<page><title>Z5</title><id>5</id><revision><text></text></revision></page>");

    let pages = read_all(&xml);

    assert_eq!(pages[0].text, None);
}

#[test]
fn test_missing_revision() {
    let xml = export("<page><title>Z6</title><id>6</id></page>");

    let pages = read_all(&xml);

    assert_eq!(pages[0].title, "Z6");
    assert_eq!(pages[0].text, None);
}

#[test]
fn test_cdata_text_is_verbatim() {
    let xml = export(
        r#"<page><title>Z7</title><id>7</id><revision><text><![CDATA[{"a": "<b>"}]]></text></revision></page>"#,
    );

    let pages = read_all(&xml);

    assert_eq!(pages[0].text.as_deref(), Some(r#"{"a": "<b>"}"#));
}

#[test]
fn test_prefixed_namespace_elements() {
    let xml = r#"<mw:mediawiki xmlns:mw="http://www.mediawiki.org/xml/export-0.10/">
  <mw:page><mw:title>Z8</mw:title><mw:id>8</mw:id>
    <mw:revision><mw:text>{}</mw:text></mw:revision>
  </mw:page>
</mw:mediawiki>"#;

    let pages = read_all(xml);

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "Z8");
    assert_eq!(pages[0].text.as_deref(), Some("{}"));
}

#[test]
fn test_nested_pages_are_not_yielded() {
    let xml = export("<siteinfo><page><title>Z9</title></page></siteinfo>");

    let pages = read_all(&xml);

    assert!(pages.is_empty());
}

#[test]
fn test_pages_read_counter() {
    let xml = export("<page><title>Z1</title></page><page><title>Z2</title></page>");
    let mut reader = DumpReader::new(xml.as_bytes());

    while let Some(page) = reader.next() {
        page.unwrap();
    }

    assert_eq!(reader.pages_read(), 2);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_open_missing_file() {
    let result = DumpReader::open(std::path::Path::new("/nonexistent/dump.xml"));

    assert!(matches!(result, Err(DumpError::Open { .. })));
}

#[test]
fn test_open_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(
        temp_file,
        "{}",
        export("<page><title>Z1</title><id>1</id><revision><text>{}</text></revision></page>")
    )?;

    let pages = DumpReader::open(temp_file.path())?.collect::<Result<Vec<_>, _>>()?;

    assert_eq!(pages.len(), 1);
    Ok(())
}

#[test]
fn test_mismatched_tags_are_an_error() {
    let xml = "<mediawiki><page><title>Z1</page></mediawiki>";

    let results: Vec<_> = DumpReader::new(xml.as_bytes()).collect();

    assert!(matches!(results.last(), Some(Err(DumpError::Xml { .. }))));
}

#[test]
fn test_empty_input_has_no_root() {
    let results: Vec<_> = DumpReader::new("".as_bytes()).collect();

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(DumpError::MissingRoot)));
}
