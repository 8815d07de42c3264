//! Splitting a combined export file into header and detail files
//!
//! Some upstream systems emit a single text file with a short header block,
//! one blank line, then the detail records. The blank line is found with a
//! bounded scan so a malformed file fails fast instead of being copied
//! wholesale into the header.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::SplitOptions;

const UTF8_BOM: &str = "\u{feff}";

/// What a successful split produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitReport {
    /// Lines written to the header file
    pub header_lines: usize,
    /// Bytes written to the details file
    pub detail_bytes: u64,
}

/// Split a combined export file at its first blank line.
///
/// Lines before the first blank (whitespace-only) line are copied to
/// `header_out`, the blank line itself is dropped, and everything after it
/// is copied byte-for-byte to `details_out`. A UTF-8 BOM at the start of
/// the source is stripped. The blank line must appear within
/// [`SplitOptions::max_scan_lines`] lines or the split fails with
/// [`CsvError::NoSeparator`].
pub fn split_export<P: AsRef<Path>>(
    full: P,
    header_out: P,
    details_out: P,
    options: &SplitOptions,
) -> CsvResult<SplitReport> {
    let mut reader = BufReader::new(File::open(full)?);

    let mut header: Vec<String> = Vec::new();
    let mut found_separator = false;

    for i in 0..options.max_scan_lines {
        let mut line = String::new();
        let n = io::BufRead::read_line(&mut reader, &mut line)?;
        if n == 0 {
            // EOF before any separator
            break;
        }

        if i == 0 {
            if let Some(stripped) = line.strip_prefix(UTF8_BOM) {
                line = stripped.to_string();
            }
        }

        if line.trim().is_empty() {
            found_separator = true;
            break;
        }
        header.push(line);
    }

    if !found_separator {
        return Err(CsvError::NoSeparator {
            scanned: options.max_scan_lines,
        });
    }

    let mut header_file = BufWriter::new(File::create(header_out)?);
    for line in &header {
        header_file.write_all(line.as_bytes())?;
    }
    header_file.flush()?;

    // The remainder goes out untouched.
    let mut details_file = BufWriter::new(File::create(details_out)?);
    let detail_bytes = copy_remainder(&mut reader, &mut details_file)?;
    details_file.flush()?;

    log::info!(
        "Split export: {} header line(s), {detail_bytes} detail byte(s)",
        header.len()
    );

    Ok(SplitReport {
        header_lines: header.len(),
        detail_bytes,
    })
}

fn copy_remainder<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> CsvResult<u64> {
    io::copy(reader, writer).map_err(CsvError::Io)
}
