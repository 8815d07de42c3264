//! End-to-end tests for export-file splitting

use std::fs;

use pretty_assertions::assert_eq;
use sheetmill_csv::{split_export, CsvError, SplitOptions};
use tempfile::tempdir;

#[test]
fn splits_header_and_details_at_first_blank_line() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.csv");
    let header = dir.path().join("header.csv");
    let details = dir.path().join("details.csv");

    let source = "Report,Monthly\nGenerated,2024-05-01\n\nid,amount\n1,10\n2,20\n";
    fs::write(&full, source).unwrap();

    let report = split_export(&full, &header, &details, &SplitOptions::default()).unwrap();

    assert_eq!(report.header_lines, 2);
    assert_eq!(
        fs::read_to_string(&header).unwrap(),
        "Report,Monthly\nGenerated,2024-05-01\n"
    );
    // Details are the byte-identical remainder after the separator.
    assert_eq!(
        fs::read_to_string(&details).unwrap(),
        "id,amount\n1,10\n2,20\n"
    );
}

#[test]
fn preserves_crlf_line_endings() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.csv");
    let header = dir.path().join("header.csv");
    let details = dir.path().join("details.csv");

    fs::write(&full, "h1\r\nh2\r\n\r\nd1\r\nd2\r\n").unwrap();
    split_export(&full, &header, &details, &SplitOptions::default()).unwrap();

    assert_eq!(fs::read(&header).unwrap(), b"h1\r\nh2\r\n");
    assert_eq!(fs::read(&details).unwrap(), b"d1\r\nd2\r\n");
}

#[test]
fn strips_utf8_bom_from_header() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.csv");
    let header = dir.path().join("header.csv");
    let details = dir.path().join("details.csv");

    fs::write(&full, "\u{feff}title\n\nbody\n").unwrap();
    split_export(&full, &header, &details, &SplitOptions::default()).unwrap();

    assert_eq!(fs::read_to_string(&header).unwrap(), "title\n");
    assert_eq!(fs::read_to_string(&details).unwrap(), "body\n");
}

#[test]
fn whitespace_only_line_counts_as_separator() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.csv");
    let header = dir.path().join("header.csv");
    let details = dir.path().join("details.csv");

    fs::write(&full, "h\n   \nd\n").unwrap();
    let report = split_export(&full, &header, &details, &SplitOptions::default()).unwrap();
    assert_eq!(report.header_lines, 1);
    assert_eq!(fs::read_to_string(&details).unwrap(), "d\n");
}

#[test]
fn missing_separator_is_an_error() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.csv");
    let header = dir.path().join("header.csv");
    let details = dir.path().join("details.csv");

    fs::write(&full, "a\nb\nc\n").unwrap();
    let err = split_export(
        &full,
        &header,
        &details,
        &SplitOptions { max_scan_lines: 2 },
    )
    .unwrap_err();
    assert!(matches!(err, CsvError::NoSeparator { scanned: 2 }));
    // Nothing was written.
    assert!(!header.exists());
    assert!(!details.exists());
}

#[test]
fn blank_first_line_yields_empty_header() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.csv");
    let header = dir.path().join("header.csv");
    let details = dir.path().join("details.csv");

    fs::write(&full, "\nrest\n").unwrap();
    let report = split_export(&full, &header, &details, &SplitOptions::default()).unwrap();
    assert_eq!(report.header_lines, 0);
    assert_eq!(fs::read_to_string(&header).unwrap(), "");
    assert_eq!(fs::read_to_string(&details).unwrap(), "rest\n");
}
