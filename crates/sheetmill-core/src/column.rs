//! Typed data columns and their missing-value policy

use chrono::NaiveDate;

use crate::datum::Datum;

/// The declared type of a frame column.
///
/// The type drives two things downstream: the display format a writer
/// selects for the column, and the substitute used for missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Integer column
    Int,
    /// Floating-point column
    Float,
    /// Plain text column
    Str,
    /// Date column
    Date,
    /// Categorical column
    Category,
}

impl ColumnType {
    /// The substitute written in place of a missing value.
    ///
    /// Numeric columns fill with zero, text with the empty string, dates
    /// with the 1899-12-31 sentinel (the day before the Excel epoch), and
    /// categoricals with a literal "None" label.
    pub fn fill_value(&self) -> Datum {
        match self {
            ColumnType::Int => Datum::Int(0),
            ColumnType::Float => Datum::Float(0.0),
            ColumnType::Str => Datum::Str(String::new()),
            ColumnType::Date => Datum::Date(sentinel_date()),
            ColumnType::Category => Datum::Category("None".to_string()),
        }
    }

    /// Short name used in log messages
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int => "integer",
            ColumnType::Float => "float",
            ColumnType::Str => "string",
            ColumnType::Date => "date",
            ColumnType::Category => "category",
        }
    }
}

/// The sentinel date substituted for missing date values.
pub fn sentinel_date() -> NaiveDate {
    // 1899-12-31 is always representable
    NaiveDate::from_ymd_opt(1899, 12, 31).unwrap()
}

/// A single data column: a declared type plus its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    ty: ColumnType,
    values: Vec<Datum>,
}

impl Column {
    /// Create a column from a declared type and its values
    pub fn new(ty: ColumnType, values: Vec<Datum>) -> Self {
        Self { ty, values }
    }

    /// The declared column type
    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    /// Number of values in the column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The column values
    pub fn values(&self) -> &[Datum] {
        &self.values
    }

    /// Whether any value in the column is missing
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Datum::is_missing)
    }

    /// Replace every missing value with the type's fill value.
    ///
    /// Returns the number of values replaced.
    pub fn fill_missing(&mut self) -> usize {
        let fill = self.ty.fill_value();
        let mut filled = 0;
        for value in &mut self.values {
            if value.is_missing() {
                *value = fill.clone();
                filled += 1;
            }
        }
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_values_per_type() {
        assert_eq!(ColumnType::Int.fill_value(), Datum::Int(0));
        assert_eq!(ColumnType::Float.fill_value(), Datum::Float(0.0));
        assert_eq!(ColumnType::Str.fill_value(), Datum::Str(String::new()));
        assert_eq!(
            ColumnType::Date.fill_value(),
            Datum::Date(NaiveDate::from_ymd_opt(1899, 12, 31).unwrap())
        );
        assert_eq!(
            ColumnType::Category.fill_value(),
            Datum::Category("None".to_string())
        );
    }

    #[test]
    fn fill_missing_replaces_only_missing() {
        let mut col = Column::new(
            ColumnType::Int,
            vec![Datum::Int(7), Datum::Missing, Datum::Missing],
        );
        assert!(col.has_missing());
        assert_eq!(col.fill_missing(), 2);
        assert!(!col.has_missing());
        assert_eq!(col.values()[0], Datum::Int(7));
        assert_eq!(col.values()[1], Datum::Int(0));
    }
}
