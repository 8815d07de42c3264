//! Label axes for frame rows and columns

use crate::error::{Error, Result};

/// A label axis: one or more levels of labels of equal length.
///
/// A plain frame has a single level on each axis; hierarchical frames
/// carry several, e.g. region over quarter on the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    levels: Vec<Vec<String>>,
}

impl Axis {
    /// Create a single-level axis
    pub fn single<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: vec![labels.into_iter().map(Into::into).collect()],
        }
    }

    /// Create a multi-level axis. All levels must have the same length.
    pub fn multi(levels: Vec<Vec<String>>) -> Result<Self> {
        let Some(first) = levels.first() else {
            return Err(Error::EmptyAxis);
        };
        let expected = first.len();
        for (i, level) in levels.iter().enumerate().skip(1) {
            if level.len() != expected {
                return Err(Error::AxisLevelMismatch {
                    level: i,
                    expected,
                    actual: level.len(),
                });
            }
        }
        Ok(Self { levels })
    }

    /// A default positional axis: "0", "1", ... "len-1"
    pub fn positional(len: usize) -> Self {
        Self::single((0..len).map(|i| i.to_string()))
    }

    /// Number of labels along the axis
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Whether the axis has no labels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of label levels
    pub fn nlevels(&self) -> usize {
        self.levels.len()
    }

    /// The labels of one level
    pub fn level(&self, level: usize) -> &[String] {
        &self.levels[level]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_rejects_ragged_levels() {
        let err = Axis::multi(vec![
            vec!["a".into(), "b".into()],
            vec!["x".into()],
        ])
        .unwrap_err();
        assert!(matches!(err, Error::AxisLevelMismatch { level: 1, .. }));
    }

    #[test]
    fn positional_axis_counts_from_zero() {
        let axis = Axis::positional(3);
        assert_eq!(axis.nlevels(), 1);
        assert_eq!(axis.level(0), &["0", "1", "2"]);
    }
}
