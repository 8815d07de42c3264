//! The tabular frame

use crate::axis::Axis;
use crate::column::Column;
use crate::error::{Error, Result};

/// A rows-by-named-columns tabular dataset.
///
/// Both axes may be multi-level. Every data column has the same length as
/// the row axis, and there is exactly one column label per data column.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: Axis,
    columns: Axis,
    data: Vec<Column>,
}

impl Frame {
    /// Create a frame from explicit axes and data columns
    pub fn new(index: Axis, columns: Axis, data: Vec<Column>) -> Result<Self> {
        if columns.len() != data.len() {
            return Err(Error::ColumnCountMismatch {
                expected: columns.len(),
                actual: data.len(),
            });
        }
        for (i, column) in data.iter().enumerate() {
            if column.len() != index.len() {
                return Err(Error::ColumnLengthMismatch {
                    name: columns.level(columns.nlevels() - 1)[i].clone(),
                    expected: index.len(),
                    actual: column.len(),
                });
            }
        }
        Ok(Self {
            index,
            columns,
            data,
        })
    }

    /// Create a frame from named columns with a default positional index
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self> {
        let len = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let (names, data): (Vec<String>, Vec<Column>) = columns.into_iter().unzip();
        Self::new(Axis::positional(len), Axis::single(names), data)
    }

    /// (rows, data columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.data.len())
    }

    /// The row label axis
    pub fn index(&self) -> &Axis {
        &self.index
    }

    /// The column label axis
    pub fn columns(&self) -> &Axis {
        &self.columns
    }

    /// A data column by position
    pub fn column(&self, col: usize) -> Result<&Column> {
        self.data
            .get(col)
            .ok_or(Error::ColumnOutOfBounds(col, self.data.len()))
    }

    /// All data columns in order
    pub fn data(&self) -> &[Column] {
        &self.data
    }

    /// Replace every missing value with its column type's fill value,
    /// logging one line per affected column.
    pub fn fill_missing(&mut self) {
        let names = self.columns.level(self.columns.nlevels() - 1).to_vec();
        for (name, column) in names.iter().zip(&mut self.data) {
            let filled = column.fill_missing();
            if filled > 0 {
                log::info!(
                    "Column {name} had {filled} missing {} value(s), filled with {}",
                    column.column_type().name(),
                    column.column_type().fill_value()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::datum::Datum;

    fn sample() -> Frame {
        Frame::from_columns(vec![
            (
                "qty".into(),
                Column::new(ColumnType::Int, vec![Datum::Int(1), Datum::Missing]),
            ),
            (
                "name".into(),
                Column::new(ColumnType::Str, vec![Datum::str("a"), Datum::str("b")]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn shape_and_labels() {
        let frame = sample();
        assert_eq!(frame.shape(), (2, 2));
        assert_eq!(frame.columns().level(0), &["qty", "name"]);
        assert_eq!(frame.index().level(0), &["0", "1"]);
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Frame::from_columns(vec![
            ("a".into(), Column::new(ColumnType::Int, vec![Datum::Int(1)])),
            (
                "b".into(),
                Column::new(ColumnType::Int, vec![Datum::Int(1), Datum::Int(2)]),
            ),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn fill_missing_applies_column_policy() {
        let mut frame = sample();
        frame.fill_missing();
        assert_eq!(frame.column(0).unwrap().values()[1], Datum::Int(0));
    }
}
