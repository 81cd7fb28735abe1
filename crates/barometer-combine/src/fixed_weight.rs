//! Fixed-weight component combination.

use barometer_traits::{BarometerError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::combiner::{Combiner, ScoreColumn, validate_columns};

/// Configuration for fixed-weight combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedWeightConfig {
    /// Weight per component name
    pub weights: Vec<(String, f64)>,
}

impl FixedWeightConfig {
    /// Builds a configuration from static `(component, weight)` pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            weights: pairs
                .iter()
                .map(|(name, weight)| ((*name).to_string(), *weight))
                .collect(),
        }
    }
}

/// Fixed-weight combiner.
///
/// Each input is looked up by name in the configured weights. The weights of
/// the inputs actually supplied are rescaled to sum to 1, so passing a subset
/// of the configured components yields their renormalized weighted average.
///
/// # Examples
///
/// ```rust,no_run
/// use barometer_combine::{Combiner, FixedWeightCombiner, FixedWeightConfig, ScoreColumn};
///
/// let combiner = FixedWeightCombiner::new(FixedWeightConfig::from_pairs(&[
///     ("z_pmi", 0.5),
///     ("z_ratio", 0.5),
/// ]));
///
/// let columns = vec![
///     ScoreColumn::from_options("z_pmi", &[Some(1.0)]),
///     ScoreColumn::from_options("z_ratio", &[Some(-0.5)]),
/// ];
/// let composite = combiner.combine(&columns).unwrap();
/// assert_eq!(composite[0], 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedWeightCombiner {
    config: FixedWeightConfig,
}

impl FixedWeightCombiner {
    /// Create a new fixed-weight combiner with the given configuration.
    pub const fn new(config: FixedWeightConfig) -> Self {
        Self { config }
    }

    /// Configured weight of a component.
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.config
            .weights
            .iter()
            .find(|(component, _)| component == name)
            .map(|(_, weight)| *weight)
    }

    /// Weights for `columns`, rescaled to sum to 1.
    fn compute_weights(&self, columns: &[ScoreColumn]) -> Result<Vec<f64>> {
        let raw = columns
            .iter()
            .map(|column| {
                self.weight(&column.name).ok_or_else(|| {
                    BarometerError::InvalidData(format!(
                        "no weight configured for component '{}'",
                        column.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total: f64 = raw.iter().sum();
        if total.abs() < 1e-10 {
            return Err(BarometerError::InvalidData(
                "component weights sum to zero".to_string(),
            ));
        }

        Ok(raw.iter().map(|w| w / total).collect())
    }
}

impl Combiner for FixedWeightCombiner {
    fn combine(&self, columns: &[ScoreColumn]) -> Result<Array1<f64>> {
        let n_rows = validate_columns(columns)?;
        let weights = self.compute_weights(columns)?;

        let mut composite = Array1::zeros(n_rows);
        for (column, &weight) in columns.iter().zip(weights.iter()) {
            composite += &(&column.scores * weight);
        }

        Ok(composite)
    }

    fn name(&self) -> &str {
        "fixed_weight"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn growth() -> FixedWeightCombiner {
        FixedWeightCombiner::new(FixedWeightConfig::from_pairs(&[
            ("z_pmi", 0.5),
            ("z_ratio", 0.5),
        ]))
    }

    #[test]
    fn test_weighted_sum() {
        let combiner = FixedWeightCombiner::new(FixedWeightConfig::from_pairs(&[
            ("a", 0.75),
            ("b", 0.25),
        ]));
        let columns = vec![
            ScoreColumn::from_options("a", &[Some(1.0), Some(2.0)]),
            ScoreColumn::from_options("b", &[Some(-1.0), Some(2.0)]),
        ];

        let result = combiner.combine(&columns).unwrap();
        assert_relative_eq!(result[0], 0.5);
        assert_relative_eq!(result[1], 2.0);
    }

    #[test]
    fn test_subset_is_renormalized() {
        let columns = vec![ScoreColumn::from_options("z_ratio", &[Some(1.2), Some(-0.4)])];

        let result = growth().combine(&columns).unwrap();
        assert_relative_eq!(result[0], 1.2);
        assert_relative_eq!(result[1], -0.4);
    }

    #[test]
    fn test_undefined_input_propagates() {
        let columns = vec![
            ScoreColumn::from_options("z_pmi", &[None, Some(1.0)]),
            ScoreColumn::from_options("z_ratio", &[Some(1.0), Some(1.0)]),
        ];

        let result = growth().combine(&columns).unwrap();
        assert!(result[0].is_nan());
        assert_relative_eq!(result[1], 1.0);
    }

    #[test]
    fn test_unknown_component_is_rejected() {
        let columns = vec![ScoreColumn::from_options("z_vix", &[Some(1.0)])];
        assert!(growth().combine(&columns).is_err());
    }

    #[test]
    fn test_zero_total_weight_is_rejected() {
        let combiner = FixedWeightCombiner::new(FixedWeightConfig::from_pairs(&[("a", 0.0)]));
        let columns = vec![ScoreColumn::from_options("a", &[Some(1.0)])];
        assert!(combiner.combine(&columns).is_err());
    }

    #[test]
    fn test_weight_lookup() {
        assert_eq!(growth().weight("z_pmi"), Some(0.5));
        assert_eq!(growth().weight("z_vix"), None);
        assert_eq!(growth().name(), "fixed_weight");
    }
}
