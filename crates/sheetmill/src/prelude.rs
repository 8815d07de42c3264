//! Prelude module - common imports for sheetmill users
//!
//! ```rust
//! use sheetmill::prelude::*;
//! ```

pub use crate::{
    // CSV types
    split_export,
    AddFrameOptions,
    // Data model
    Axis,
    Column,
    ColumnType,

    CsvWriteOptions,
    Datum,
    // Error types
    Error,
    Frame,
    // XLSX types
    FrameWriter,
    LineTerminator,
    MergedRange,
    ReadOptions,
    Result,
    RowWriter,
    SheetReader,
    SplitOptions,
    SplitReport,
};
