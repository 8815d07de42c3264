//! # sheetmill-core
//!
//! Core data structures for the sheetmill spreadsheet utilities.
//!
//! This crate provides the fundamental types shared by the I/O crates:
//! - [`Datum`] - A single cell value (numbers, strings, dates, categories)
//! - [`Column`] and [`ColumnType`] - Typed data columns with a declared
//!   missing-value policy
//! - [`Axis`] - Row/column label axes, possibly multi-level
//! - [`Frame`] - A rows-by-named-columns tabular dataset
//!
//! ## Example
//!
//! ```rust
//! use sheetmill_core::{Column, ColumnType, Datum, Frame};
//!
//! let frame = Frame::from_columns(vec![
//!     ("qty".into(), Column::new(ColumnType::Int, vec![Datum::Int(3), Datum::Missing])),
//!     ("label".into(), Column::new(ColumnType::Str, vec![Datum::str("a"), Datum::str("b")])),
//! ]).unwrap();
//!
//! assert_eq!(frame.shape(), (2, 2));
//! ```

pub mod axis;
pub mod column;
pub mod datum;
pub mod error;
pub mod frame;

// Re-exports for convenience
pub use axis::Axis;
pub use column::{Column, ColumnType};
pub use datum::Datum;
pub use error::{Error, Result};
pub use frame::Frame;

/// Maximum length of a sheet name (Excel limit)
pub const MAX_SHEET_NAME_LEN: usize = 31;
