//! Split and write options

/// Options for splitting a combined export file
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Maximum number of lines to scan for the blank separator line
    pub max_scan_lines: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self { max_scan_lines: 30 }
    }
}

/// Options for writing rows as delimited text
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::CRLF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}
