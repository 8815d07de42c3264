//! Error types for sheetmill-xlsx

use thiserror::Error;

/// Result type alias using [`XlsxError`]
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur reading or writing XLSX files
#[derive(Debug, Error)]
pub enum XlsxError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the workbook writer
    #[error("XLSX write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Error from the workbook reader
    #[error("XLSX read error: {0}")]
    Read(#[from] calamine::XlsxError),

    /// Error exporting rows as delimited text
    #[error(transparent)]
    Csv(#[from] sheetmill_csv::CsvError),

    /// Core frame error
    #[error(transparent)]
    Core(#[from] sheetmill_core::Error),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet name longer than the format allows
    #[error("Sheet name '{name}' is longer than {max} characters")]
    SheetNameTooLong { name: String, max: usize },

    /// The workbook contains no sheets
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// No non-empty cell found in the header scan window
    #[error("No header found in the top-left {rows}x{cols} window")]
    NoHeader {
        /// Rows scanned
        rows: u32,
        /// Columns scanned
        cols: u32,
    },
}
