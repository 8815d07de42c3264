//! # sheetmill-csv
//!
//! Delimited-text helpers for sheetmill: splitting a combined export file
//! into header and detail sections, and writing rows of [`Datum`] values
//! out as CSV.
//!
//! [`Datum`]: sheetmill_core::Datum

mod error;
mod options;
mod split;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator, SplitOptions};
pub use split::{split_export, SplitReport};
pub use writer::RowWriter;
