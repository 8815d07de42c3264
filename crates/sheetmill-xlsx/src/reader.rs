//! Worksheet reading: unmerge, header detection, row export

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::Timelike;

use sheetmill_core::Datum;
use sheetmill_csv::{CsvWriteOptions, RowWriter};

use crate::error::{XlsxError, XlsxResult};

/// Header auto-detection scans this many rows and columns from A1.
const HEADER_SCAN_ROWS: u32 = 10;
const HEADER_SCAN_COLS: u32 = 10;

/// A rectangular block of cells that was merged in the source sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergedRange {
    /// Whether (row, col) falls inside the range
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.first_row && row <= self.last_row && col >= self.first_col && col <= self.last_col
    }

    /// Whether (row, col) is the top-left anchor cell
    pub fn is_anchor(&self, row: u32, col: u32) -> bool {
        row == self.first_row && col == self.first_col
    }
}

/// Options for [`SheetReader::open`].
///
/// Any field left `None` is auto-detected from the sheet contents.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Sheet to read by name (default: the first sheet)
    pub sheet: Option<String>,
    /// 0-based row holding the column labels
    pub header_row: Option<u32>,
    /// 0-based columns holding labels on the header row
    pub header_columns: Option<Vec<u32>>,
    /// Last 0-based row to read, inclusive
    pub end_row: Option<u32>,
}

/// Reads one worksheet of an existing workbook into addressable cells.
///
/// Merged ranges are split on load: only the top-left anchor keeps its
/// value, every other cell in the range reads as empty. The header block
/// is then located by scanning a bounded top-left window in row-major
/// order for the first non-empty cell.
#[derive(Debug)]
pub struct SheetReader {
    sheet_name: String,
    grid: Vec<Vec<Datum>>,
    merged: Vec<MergedRange>,
    header_row: u32,
    header_columns: Vec<u32>,
    end_row: u32,
}

impl SheetReader {
    /// Open a workbook file and prepare one sheet for reading
    pub fn open<P: AsRef<Path>>(path: P, options: &ReadOptions) -> XlsxResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;
        workbook.load_merged_regions()?;

        let sheet_name = match &options.sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(XlsxError::SheetNotFound(name.clone()));
                }
                name.clone()
            }
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(XlsxError::NoSheets)?,
        };

        let merged: Vec<MergedRange> = workbook
            .merged_regions_by_sheet(&sheet_name)
            .iter()
            .map(|(_, _, dims)| MergedRange {
                first_row: dims.start.0,
                first_col: dims.start.1,
                last_row: dims.end.0,
                last_col: dims.end.1,
            })
            .collect();

        let range = workbook.worksheet_range(&sheet_name)?;
        let mut grid = materialize(&range);
        unmerge(&mut grid, &merged);

        let (height, width) = grid_size(&grid);

        let header_row = match options.header_row {
            Some(row) => row,
            None => detect_header_row(&grid)?,
        };

        let header_columns = match &options.header_columns {
            Some(cols) => cols.clone(),
            None => (0..width as u32)
                .filter(|&col| !cell_at(&grid, header_row, col).is_missing())
                .collect(),
        };

        let end_row = options.end_row.unwrap_or(height.saturating_sub(1) as u32);

        Ok(Self {
            sheet_name,
            grid,
            merged,
            header_row,
            header_columns,
            end_row,
        })
    }

    /// Name of the sheet being read
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Detected or supplied header row (0-based)
    pub fn header_row(&self) -> u32 {
        self.header_row
    }

    /// Detected or supplied header columns (0-based)
    pub fn header_columns(&self) -> &[u32] {
        &self.header_columns
    }

    /// Last row read, inclusive (0-based)
    pub fn end_row(&self) -> u32 {
        self.end_row
    }

    /// The merged ranges that were split on load
    pub fn merged_ranges(&self) -> &[MergedRange] {
        &self.merged
    }

    /// The column labels from the header row
    pub fn header(&self) -> Vec<Datum> {
        self.row_at(self.header_row)
    }

    /// The header row plus every following row through `end_row`,
    /// restricted to the header columns.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Datum>> + '_ {
        (self.header_row..=self.end_row).map(|row| self.row_at(row))
    }

    /// Value at an absolute (row, col) position
    pub fn cell(&self, row: u32, col: u32) -> &Datum {
        cell_at(&self.grid, row, col)
    }

    /// Write the rows out as a delimited text file
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()> {
        RowWriter::write_file(self.rows(), path, &CsvWriteOptions::default())?;
        Ok(())
    }

    fn row_at(&self, row: u32) -> Vec<Datum> {
        self.header_columns
            .iter()
            .map(|&col| cell_at(&self.grid, row, col).clone())
            .collect()
    }
}

/// Copy a calamine range into an absolute-indexed grid (A1 at [0][0]).
fn materialize(range: &calamine::Range<Data>) -> Vec<Vec<Datum>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    let height = end_row as usize + 1;
    let width = end_col as usize + 1;
    let mut grid = vec![vec![Datum::Missing; width]; height];

    for (r, row) in range.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            grid[start_row as usize + r][start_col as usize + c] = datum_from(cell);
        }
    }

    grid
}

/// Split merged ranges: everything but the anchor becomes empty.
fn unmerge(grid: &mut [Vec<Datum>], merged: &[MergedRange]) {
    for range in merged {
        for row in range.first_row..=range.last_row {
            for col in range.first_col..=range.last_col {
                if range.is_anchor(row, col) {
                    continue;
                }
                if let Some(cell) = grid
                    .get_mut(row as usize)
                    .and_then(|r| r.get_mut(col as usize))
                {
                    *cell = Datum::Missing;
                }
            }
        }
    }
}

/// Row of the first non-empty cell, scanning the top-left window row-major.
fn detect_header_row(grid: &[Vec<Datum>]) -> XlsxResult<u32> {
    let (height, width) = grid_size(grid);
    for row in 0..HEADER_SCAN_ROWS.min(height as u32) {
        for col in 0..HEADER_SCAN_COLS.min(width as u32) {
            if !cell_at(grid, row, col).is_missing() {
                return Ok(row);
            }
        }
    }
    Err(XlsxError::NoHeader {
        rows: HEADER_SCAN_ROWS,
        cols: HEADER_SCAN_COLS,
    })
}

fn grid_size(grid: &[Vec<Datum>]) -> (usize, usize) {
    let height = grid.len();
    let width = grid.first().map(Vec::len).unwrap_or(0);
    (height, width)
}

fn cell_at(grid: &[Vec<Datum>], row: u32, col: u32) -> &Datum {
    const EMPTY: &Datum = &Datum::Missing;
    grid.get(row as usize)
        .and_then(|r| r.get(col as usize))
        .unwrap_or(EMPTY)
}

fn datum_from(cell: &Data) -> Datum {
    match cell {
        Data::Empty => Datum::Missing,
        Data::String(s) => Datum::Str(s.clone()),
        Data::Int(i) => Datum::Int(*i),
        Data::Float(f) => Datum::Float(*f),
        Data::Bool(b) => Datum::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.time().num_seconds_from_midnight() == 0 => {
                Datum::Date(naive.date())
            }
            Some(naive) => Datum::DateTime(naive),
            None => Datum::Float(dt.as_f64()),
        },
        Data::Error(e) => Datum::Str(e.to_string()),
        other => Datum::Str(other.to_string()),
    }
}
