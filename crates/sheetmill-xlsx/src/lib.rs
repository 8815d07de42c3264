//! # sheetmill-xlsx
//!
//! XLSX I/O for sheetmill, built on off-the-shelf format libraries rather
//! than a codec of its own:
//!
//! - [`FrameWriter`] writes [`Frame`]s into new workbooks with per-column
//!   formatting (via `rust_xlsxwriter`)
//! - [`SheetReader`] opens an existing workbook, splits merged cells,
//!   detects the header block, and exposes the data rows (via `calamine`)
//!
//! [`Frame`]: sheetmill_core::Frame

mod error;
mod reader;
mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::{MergedRange, ReadOptions, SheetReader};
pub use writer::{AddFrameOptions, FrameWriter};
