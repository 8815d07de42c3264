//! Cell value type

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// A single cell value.
///
/// All numbers keep their source width (`Int`/`Float`); dates are calendar
/// dates or timestamps, never serial numbers. `Category` is a string drawn
/// from a closed set of labels and only differs from `Str` in its
/// missing-value policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// No value present
    Missing,

    /// Integer value
    Int(i64),

    /// Floating-point value
    Float(f64),

    /// Boolean value
    Bool(bool),

    /// String value
    Str(String),

    /// Calendar date (no time component)
    Date(NaiveDate),

    /// Date with a time component
    DateTime(NaiveDateTime),

    /// Categorical label
    Category(String),
}

impl Datum {
    /// Create a new string value
    pub fn str<S: Into<String>>(s: S) -> Self {
        Datum::Str(s.into())
    }

    /// Create a new categorical value
    pub fn category<S: Into<String>>(s: S) -> Self {
        Datum::Category(s.into())
    }

    /// Check if the value is missing
    pub fn is_missing(&self) -> bool {
        matches!(self, Datum::Missing)
    }

    /// Try to get the value as a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Int(i) => Some(*i as f64),
            Datum::Float(f) => Some(*f),
            Datum::Bool(true) => Some(1.0),
            Datum::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::Str(s) | Datum::Category(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a date, truncating any time component
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Datum::Date(d) => Some(*d),
            Datum::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Missing => Ok(()),
            Datum::Int(i) => write!(f, "{i}"),
            Datum::Float(v) => write!(f, "{v}"),
            Datum::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Datum::Str(s) | Datum::Category(s) => write!(f, "{s}"),
            Datum::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Datum::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Str(s.to_string())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Str(s)
    }
}

impl From<i64> for Datum {
    fn from(i: i64) -> Self {
        Datum::Int(i)
    }
}

impl From<f64> for Datum {
    fn from(f: f64) -> Self {
        Datum::Float(f)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Datum::Bool(b)
    }
}

impl From<NaiveDate> for Datum {
    fn from(d: NaiveDate) -> Self {
        Datum::Date(d)
    }
}

impl From<NaiveDateTime> for Datum {
    fn from(dt: NaiveDateTime) -> Self {
        Datum::DateTime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_empty_for_missing() {
        assert_eq!(Datum::Missing.to_string(), "");
        assert_eq!(Datum::Int(42).to_string(), "42");
        assert_eq!(Datum::str("x").to_string(), "x");
    }

    #[test]
    fn as_f64_covers_numeric_variants() {
        assert_eq!(Datum::Int(3).as_f64(), Some(3.0));
        assert_eq!(Datum::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Datum::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Datum::str("3").as_f64(), None);
    }

    #[test]
    fn as_date_truncates_time() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let dt = d.and_hms_opt(13, 30, 0).unwrap();
        assert_eq!(Datum::DateTime(dt).as_date(), Some(d));
    }
}
