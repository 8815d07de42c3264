//! End-to-end tests for worksheet reading against hand-built workbooks

use pretty_assertions::assert_eq;
use rust_xlsxwriter::{Format, Workbook};
use sheetmill::prelude::*;
use sheetmill::XlsxError;

#[test]
fn detects_offset_header_block() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("offset.xlsx");

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    // Header block starts at D4 (0-based row 3, col 2..4)
    ws.write_string(3, 2, "name").unwrap();
    ws.write_string(3, 3, "qty").unwrap();
    ws.write_string(3, 4, "site").unwrap();
    ws.write_string(4, 2, "widget").unwrap();
    ws.write_number(4, 3, 12.0).unwrap();
    ws.write_string(4, 4, "north").unwrap();
    ws.write_string(5, 2, "gadget").unwrap();
    ws.write_number(5, 3, 7.0).unwrap();
    ws.write_string(5, 4, "south").unwrap();
    wb.save(&path).unwrap();

    let reader = SheetReader::open(&path, &ReadOptions::default()).unwrap();
    assert_eq!(reader.header_row(), 3);
    assert_eq!(reader.header_columns(), &[2, 3, 4]);
    assert_eq!(reader.end_row(), 5);
    assert_eq!(
        reader.header(),
        vec![Datum::str("name"), Datum::str("qty"), Datum::str("site")]
    );

    // The header row is included in the exported rows
    let rows: Vec<Vec<Datum>> = reader.rows().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[1],
        vec![Datum::str("widget"), Datum::Float(12.0), Datum::str("north")]
    );
}

#[test]
fn merged_cells_keep_only_the_anchor_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.xlsx");

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    let fmt = Format::new();
    // A merged title banner above the data
    ws.merge_range(0, 0, 1, 2, "Quarterly Report", &fmt).unwrap();
    ws.write_string(2, 0, "qty").unwrap();
    ws.write_number(3, 0, 5.0).unwrap();
    wb.save(&path).unwrap();

    let reader = SheetReader::open(&path, &ReadOptions::default()).unwrap();
    assert_eq!(reader.merged_ranges().len(), 1);
    let range = reader.merged_ranges()[0];
    assert!(range.contains(1, 2));
    assert!(range.is_anchor(0, 0));

    assert_eq!(reader.cell(0, 0), &Datum::str("Quarterly Report"));
    assert!(reader.cell(0, 1).is_missing());
    assert!(reader.cell(1, 0).is_missing());
    assert_eq!(reader.cell(3, 0), &Datum::Float(5.0));
}

#[test]
fn explicit_bounds_override_detection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bounds.xlsx");

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "junk").unwrap();
    ws.write_string(2, 0, "name").unwrap();
    ws.write_string(2, 1, "qty").unwrap();
    ws.write_string(3, 0, "widget").unwrap();
    ws.write_number(3, 1, 1.0).unwrap();
    ws.write_string(4, 0, "gadget").unwrap();
    ws.write_number(4, 1, 2.0).unwrap();
    wb.save(&path).unwrap();

    let reader = SheetReader::open(
        &path,
        &ReadOptions {
            header_row: Some(2),
            header_columns: Some(vec![0, 1]),
            end_row: Some(3),
            ..ReadOptions::default()
        },
    )
    .unwrap();

    let rows: Vec<Vec<Datum>> = reader.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec![Datum::str("widget"), Datum::Float(1.0)]);
}

#[test]
fn reads_sheet_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("named.xlsx");

    let mut wb = Workbook::new();
    wb.add_worksheet().set_name("First").unwrap();
    let ws = wb.add_worksheet();
    ws.set_name("Second").unwrap();
    ws.write_string(0, 0, "hello").unwrap();
    wb.save(&path).unwrap();

    let reader = SheetReader::open(
        &path,
        &ReadOptions {
            sheet: Some("Second".to_string()),
            ..ReadOptions::default()
        },
    )
    .unwrap();
    assert_eq!(reader.sheet_name(), "Second");
    assert_eq!(reader.cell(0, 0), &Datum::str("hello"));
}

#[test]
fn unknown_sheet_name_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xlsx");

    let mut wb = Workbook::new();
    wb.add_worksheet().write_string(0, 0, "x").unwrap();
    wb.save(&path).unwrap();

    let err = SheetReader::open(
        &path,
        &ReadOptions {
            sheet: Some("Nope".to_string()),
            ..ReadOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, XlsxError::SheetNotFound(name) if name == "Nope"));
}

#[test]
fn header_outside_scan_window_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.xlsx");

    let mut wb = Workbook::new();
    // First content well below the 10x10 detection window
    wb.add_worksheet().write_string(12, 0, "late").unwrap();
    wb.save(&path).unwrap();

    let err = SheetReader::open(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, XlsxError::NoHeader { .. }));
}

#[test]
fn export_csv_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx_path = dir.path().join("data.xlsx");
    let csv_path = dir.path().join("data.csv");

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "name").unwrap();
    ws.write_string(0, 1, "qty").unwrap();
    ws.write_string(1, 0, "widget").unwrap();
    ws.write_number(1, 1, 2.0).unwrap();
    wb.save(&xlsx_path).unwrap();

    let reader = SheetReader::open(&xlsx_path, &ReadOptions::default()).unwrap();
    reader.export_csv(&csv_path).unwrap();

    let written = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(written, "name,qty\r\nwidget,2\r\n");
}
