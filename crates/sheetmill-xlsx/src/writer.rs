//! Formatted frame export

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use sheetmill_core::{ColumnType, Datum, Frame, MAX_SHEET_NAME_LEN};

use crate::error::{XlsxError, XlsxResult};

/// Placement and formatting options for [`FrameWriter::add_frame`]
#[derive(Debug, Clone)]
pub struct AddFrameOptions {
    /// Name of the sheet to create (default: "Sheet1")
    pub sheet_name: String,
    /// Rows to skip above the frame
    pub offset_row: u32,
    /// Columns to skip left of the frame
    pub offset_col: u16,
    /// Per-column format overrides, keyed by 0-based data column
    pub column_formats: HashMap<usize, Format>,
}

impl Default for AddFrameOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            offset_row: 0,
            offset_col: 0,
            column_formats: HashMap::new(),
        }
    }
}

impl AddFrameOptions {
    /// Options targeting a named sheet, no offsets
    pub fn sheet<S: Into<String>>(name: S) -> Self {
        Self {
            sheet_name: name.into(),
            ..Self::default()
        }
    }
}

/// Writes frames into a new workbook with fixed house formatting.
///
/// Labels are written bold; data cells pick a format from the column's
/// declared type unless an explicit override is supplied. All formats use
/// Arial 8 to match the reports this feeds into.
pub struct FrameWriter {
    workbook: Workbook,
    string_format: Format,
    number_format: Format,
    date_format: Format,
    header_format: Format,
}

impl FrameWriter {
    /// Create a writer with the standard format set
    pub fn new() -> Self {
        let base = Format::new().set_font_name("Arial").set_font_size(8);
        Self {
            string_format: base.clone(),
            number_format: base.clone().set_num_format("#,##0"),
            date_format: base.clone().set_num_format("dd/mm/yyyy"),
            header_format: base.set_bold(),
            workbook: Workbook::new(),
        }
    }

    /// The format applied to date columns (useful as a base for overrides)
    pub fn date_format(&self) -> Format {
        self.date_format.clone()
    }

    /// The format applied to numeric columns
    pub fn number_format(&self) -> Format {
        self.number_format.clone()
    }

    /// Write a frame into a new sheet.
    ///
    /// Row and column labels (all levels) go in bold around the data
    /// block, offset per `options`. Missing data values are substituted
    /// with the column type's fill value at write time; each affected
    /// column logs one line.
    ///
    /// Returns `Ok(false)` without touching the workbook when the sheet
    /// name is already taken: the collision is reported via `log::warn!`
    /// rather than treated as a hard failure.
    pub fn add_frame(&mut self, frame: &Frame, options: &AddFrameOptions) -> XlsxResult<bool> {
        if options.sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(XlsxError::SheetNameTooLong {
                name: options.sheet_name.clone(),
                max: MAX_SHEET_NAME_LEN,
            });
        }

        if self
            .workbook
            .worksheet_from_name(&options.sheet_name)
            .is_ok()
        {
            log::warn!("Sheet name {} is duplicated, skipping", options.sheet_name);
            return Ok(false);
        }

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&options.sheet_name)?;
        log::info!("Worksheet created: {}", options.sheet_name);

        let index_levels = frame.index().nlevels() as u16;
        let column_levels = frame.columns().nlevels() as u32;
        let (row_num, col_num) = frame.shape();

        // Row labels: below the column-label block, one column per level.
        for level in 0..frame.index().nlevels() {
            for (i, label) in frame.index().level(level).iter().enumerate() {
                worksheet.write_string_with_format(
                    options.offset_row + column_levels + i as u32,
                    options.offset_col + level as u16,
                    label,
                    &self.header_format,
                )?;
            }
        }

        // Column labels: right of the row-label block, one row per level.
        for level in 0..frame.columns().nlevels() {
            for (j, label) in frame.columns().level(level).iter().enumerate() {
                worksheet.write_string_with_format(
                    options.offset_row + level as u32,
                    options.offset_col + index_levels + j as u16,
                    label,
                    &self.header_format,
                )?;
            }
        }

        // Data cells, column by column so the format is picked once.
        for col in 0..col_num {
            let column = frame.column(col)?;
            let format = match options.column_formats.get(&col) {
                Some(explicit) => explicit,
                None => match column.column_type() {
                    ColumnType::Int | ColumnType::Float => &self.number_format,
                    ColumnType::Date => &self.date_format,
                    ColumnType::Str | ColumnType::Category => &self.string_format,
                },
            };

            let fill = column.column_type().fill_value();
            let mut filled = 0usize;

            for (row, value) in column.values().iter().enumerate() {
                let value = if value.is_missing() {
                    filled += 1;
                    &fill
                } else {
                    value
                };

                let target_row = options.offset_row + column_levels + row as u32;
                let target_col = options.offset_col + index_levels + col as u16;
                write_datum(worksheet, target_row, target_col, value, format)?;
            }

            if filled > 0 {
                let name = frame.columns().level(frame.columns().nlevels() - 1)[col].clone();
                log::info!(
                    "Column {name} had {filled} missing {} value(s), filled with {fill}",
                    column.column_type().name()
                );
            }
        }

        Ok(true)
    }

    /// Write the workbook out and close it
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> XlsxResult<()> {
        self.workbook.save(path.as_ref())?;
        Ok(())
    }
}

impl Default for FrameWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_datum(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: &Datum,
    format: &Format,
) -> XlsxResult<()> {
    match value {
        Datum::Int(i) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        Datum::Float(f) => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
        Datum::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        Datum::Str(s) | Datum::Category(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
        Datum::Date(d) => {
            worksheet.write_datetime_with_format(row, col, d, format)?;
        }
        Datum::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, format)?;
        }
        Datum::Missing => {
            worksheet.write_blank(row, col, format)?;
        }
    }
    Ok(())
}
