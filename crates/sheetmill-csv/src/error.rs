//! CSV errors

use thiserror::Error;

/// Result type alias using [`CsvError`]
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors from splitting or writing delimited files
#[derive(Debug, Error)]
pub enum CsvError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No blank separator line found within the scan window
    #[error("No blank separator line within the first {scanned} line(s)")]
    NoSeparator {
        /// How many lines were scanned before giving up
        scanned: usize,
    },
}
