//! Delimited output for rows of cell values

use std::fs::File;
use std::io::Write;
use std::path::Path;

use sheetmill_core::Datum;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};

/// CSV writer for sequences of [`Datum`] rows
pub struct RowWriter;

impl RowWriter {
    /// Write rows to a CSV file
    pub fn write_file<P, I, R>(rows: I, path: P, options: &CsvWriteOptions) -> CsvResult<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = R>,
        R: AsRef<[Datum]>,
    {
        let file = File::create(path)?;
        Self::write(rows, file, options)
    }

    /// Write rows to a writer
    pub fn write<W, I, R>(rows: I, writer: W, options: &CsvWriteOptions) -> CsvResult<()>
    where
        W: Write,
        I: IntoIterator<Item = R>,
        R: AsRef<[Datum]>,
    {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        for row in rows {
            let record: Vec<String> = row.as_ref().iter().map(Datum::to_string).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_datum_rows_with_lf() {
        let rows = vec![
            vec![Datum::str("a"), Datum::Int(1)],
            vec![Datum::str("b"), Datum::Missing],
        ];
        let mut buf = Vec::new();
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..CsvWriteOptions::default()
        };
        RowWriter::write(&rows, &mut buf, &options).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,1\nb,\n");
    }
}
