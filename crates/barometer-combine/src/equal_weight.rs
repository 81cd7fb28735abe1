//! Equal-weighted component combination.

use barometer_traits::Result;
use ndarray::Array1;

use crate::combiner::{Combiner, ScoreColumn, validate_columns};

/// Equal-weighted combiner: the arithmetic mean of its inputs, row by row.
///
/// Inputs are assumed to already share a scale, so the output is not
/// re-standardized.
///
/// # Examples
///
/// ```rust,no_run
/// use barometer_combine::{Combiner, EqualWeightCombiner, ScoreColumn};
///
/// let combiner = EqualWeightCombiner::new();
/// let columns = vec![
///     ScoreColumn::from_options("score_vix", &[Some(40.0), Some(60.0)]),
///     ScoreColumn::from_options("score_junk", &[Some(80.0), None]),
/// ];
///
/// let composite = combiner.combine(&columns).unwrap();
/// assert_eq!(composite[0], 60.0);
/// assert!(composite[1].is_nan());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualWeightCombiner;

impl EqualWeightCombiner {
    /// Create a new equal-weight combiner.
    pub const fn new() -> Self {
        Self
    }
}

impl Combiner for EqualWeightCombiner {
    fn combine(&self, columns: &[ScoreColumn]) -> Result<Array1<f64>> {
        let n_rows = validate_columns(columns)?;

        let mut composite = Array1::zeros(n_rows);
        for column in columns {
            composite += &column.scores;
        }
        composite /= columns.len() as f64;

        Ok(composite)
    }

    fn name(&self) -> &str {
        "equal_weight"
    }
}
