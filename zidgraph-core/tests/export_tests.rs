// Tests for the CSV export

use serde_json::json;
use tempfile::TempDir;
use zidgraph_core::export::{CSV_COLUMNS, records_to_csv, save_records_csv, write_records_csv};
use zidgraph_core::model::Record;

fn records() -> Vec<Record> {
    vec![
        Record::implementation("101", "Z100", "Z1", json!({"Z1K1": "Z7", "Z7K1": "Z802"})),
        Record::function("102", "Z1", "Z40"),
    ]
}

#[test]
fn test_header_row() {
    let csv = records_to_csv(&[]);
    assert_eq!(csv, "title,id,otype,parent,composition,resultType\n");
    assert_eq!(CSV_COLUMNS.len(), 6);
}

#[test]
fn test_rows_follow_record_order() {
    let csv = records_to_csv(&records());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        r#"Z100,101,Z14,Z1,"{""Z1K1"":""Z7"",""Z7K1"":""Z802""}","#
    );
    assert_eq!(lines[2], "Z1,102,Z8,,,Z40");
}

#[test]
fn test_write_to_writer() {
    let mut buf = Vec::new();
    write_records_csv(&records(), &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), records_to_csv(&records()));
}

#[test]
fn test_export_is_deterministic() {
    assert_eq!(records_to_csv(&records()), records_to_csv(&records()));
}

#[test]
fn test_non_ascii_is_utf8() {
    let records = vec![Record::implementation("1", "Z100", "Z1", json!({"Z6K1": "héllo"}))];
    let csv = records_to_csv(&records);
    assert!(csv.contains("héllo"));
}

#[test]
fn test_save_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("items.csv");

    save_records_csv(&records(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("title,id,otype,parent,composition,resultType\n"));
    assert_eq!(content.lines().count(), 3);
}
