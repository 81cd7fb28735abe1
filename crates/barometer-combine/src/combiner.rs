//! Core trait definition for component combiners.

use barometer_traits::{BarometerError, Result};
use ndarray::Array1;

/// One component column prepared for combination.
///
/// Undefined values are carried as `NaN`, so any arithmetic touching an
/// undefined input yields an undefined output.
#[derive(Debug, Clone)]
pub struct ScoreColumn {
    /// Component name (used for weight lookup and diagnostics)
    pub name: String,

    /// One score per calendar row, `NaN` where undefined
    pub scores: Array1<f64>,
}

impl ScoreColumn {
    /// Builds a column from optional values.
    pub fn from_options(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        Self {
            name: name.into(),
            scores: values.iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
        }
    }
}

/// Converts a combined column back to optional values (`NaN` → `None`).
pub fn to_options(scores: &Array1<f64>) -> Vec<Option<f64>> {
    scores
        .iter()
        .map(|&x| x.is_finite().then_some(x))
        .collect()
}

/// Combines multiple component columns into a composite column.
///
/// Implementors define different strategies for weighting and combining
/// components. All implementations must be thread-safe (Send + Sync).
///
/// # Examples
///
/// ```rust,no_run
/// use barometer_combine::{Combiner, ScoreColumn};
/// use ndarray::Array1;
///
/// struct FirstOnly;
///
/// impl Combiner for FirstOnly {
///     fn combine(&self, columns: &[ScoreColumn]) -> barometer_traits::Result<Array1<f64>> {
///         Ok(columns[0].scores.clone())
///     }
///
///     fn name(&self) -> &str {
///         "first_only"
///     }
/// }
/// ```
pub trait Combiner: Send + Sync {
    /// Combine component columns into a composite column.
    ///
    /// # Arguments
    ///
    /// * `columns` - Component columns to combine. All must have the same length.
    ///
    /// # Returns
    ///
    /// A composite column with the same length as the inputs. A row is `NaN`
    /// wherever any input row is `NaN`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No columns provided
    /// - Columns have mismatched lengths
    fn combine(&self, columns: &[ScoreColumn]) -> Result<Array1<f64>>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}

/// Checks that `columns` is non-empty and rectangular, returning the row count.
pub(crate) fn validate_columns(columns: &[ScoreColumn]) -> Result<usize> {
    let Some(first) = columns.first() else {
        return Err(BarometerError::InvalidData(
            "cannot combine zero components".to_string(),
        ));
    };
    let n_rows = first.scores.len();

    for column in columns {
        if column.scores.len() != n_rows {
            return Err(BarometerError::InvalidData(format!(
                "component '{}' has {} rows, expected {}",
                column.name,
                column.scores.len(),
                n_rows
            )));
        }
    }

    Ok(n_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options_round_trip() {
        let column = ScoreColumn::from_options("z_pmi", &[Some(0.5), None, Some(-1.0)]);

        assert_eq!(column.name, "z_pmi");
        assert!(column.scores[1].is_nan());
        assert_eq!(to_options(&column.scores), vec![Some(0.5), None, Some(-1.0)]);
    }

    #[test]
    fn test_validate_columns() {
        assert!(validate_columns(&[]).is_err());

        let a = ScoreColumn::from_options("a", &[Some(1.0), Some(2.0)]);
        let b = ScoreColumn::from_options("b", &[Some(1.0)]);
        assert_eq!(validate_columns(std::slice::from_ref(&a)).unwrap(), 2);
        assert!(validate_columns(&[a, b]).is_err());
    }
}
