//! Error types for sheetmill-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetmill-core
#[derive(Debug, Error)]
pub enum Error {
    /// Axis levels have mismatched lengths
    #[error("Axis level {level} has {actual} labels, expected {expected}")]
    AxisLevelMismatch {
        level: usize,
        expected: usize,
        actual: usize,
    },

    /// An axis must have at least one level
    #[error("Axis must have at least one level")]
    EmptyAxis,

    /// Column length does not match the row axis
    #[error("Column '{name}' has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Data column count does not match the column axis
    #[error("Frame has {actual} data columns but {expected} column labels")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (count: {1})")]
    ColumnOutOfBounds(usize, usize),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
