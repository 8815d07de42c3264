//! # sheetmill
//!
//! Spreadsheet utilities for report pipelines: write tabular frames into
//! formatted XLSX workbooks, read worksheets back out (splitting merged
//! cells and auto-detecting the header block), and split combined CSV
//! exports into their header and detail parts.
//!
//! This crate re-exports the public API of the member crates:
//!
//! - [`sheetmill_core`] - the [`Frame`]/[`Column`]/[`Datum`] data model
//! - [`sheetmill_xlsx`] - [`FrameWriter`] and [`SheetReader`]
//! - [`sheetmill_csv`] - [`split_export`] and [`RowWriter`]
//!
//! Excel COM automation (refreshing data connections, PDF export) lives in
//! the separate `sheetmill-excel-com` crate since it needs a bridge
//! process running under WINE.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetmill::prelude::*;
//!
//! # fn main() -> sheetmill::Result<()> {
//! let frame = Frame::from_columns(vec![
//!     (
//!         "qty".into(),
//!         Column::new(ColumnType::Int, vec![Datum::Int(3), Datum::Missing]),
//!     ),
//!     (
//!         "label".into(),
//!         Column::new(ColumnType::Str, vec![Datum::str("a"), Datum::str("b")]),
//!     ),
//! ])?;
//!
//! let mut writer = FrameWriter::new();
//! writer.add_frame(&frame, &AddFrameOptions::sheet("Report"))?;
//! writer.save("report.xlsx")?;
//! # Ok(())
//! # }
//! ```

pub mod prelude;

// Data model
pub use sheetmill_core::{Axis, Column, ColumnType, Datum, Frame, MAX_SHEET_NAME_LEN};

// CSV splitting and writing
pub use sheetmill_csv::{
    split_export, CsvError, CsvWriteOptions, LineTerminator, RowWriter, SplitOptions, SplitReport,
};

// XLSX reading and writing
pub use sheetmill_xlsx::{
    AddFrameOptions, FrameWriter, MergedRange, ReadOptions, SheetReader, XlsxError,
};

/// Unified error type covering every sheetmill operation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sheetmill_core::Error),
    #[error(transparent)]
    Csv(#[from] sheetmill_csv::CsvError),
    #[error(transparent)]
    Xlsx(#[from] sheetmill_xlsx::XlsxError),
}

/// Result alias for the unified [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
