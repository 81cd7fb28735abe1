//! Rolling normalizers that turn aligned raw columns into scores.
//!
//! - [`RollingZScore`]: standard deviations from the trailing mean
//! - [`RollingMinMax`]: position between the trailing min and max, 0-100
//!
//! [`NormalizerSet`] holds the run's window parameters and hands out the
//! strategy a component asks for.

mod minmax;
mod zscore;

pub use minmax::{RollingMinMax, RollingMinMaxConfig};
pub use zscore::{RollingZScore, RollingZScoreConfig};

use barometer_traits::Normalizer;
use serde::{Deserialize, Serialize};

/// How a component's raw column is turned into its reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalization {
    /// Rolling Z-score over the Z window.
    ZScore,
    /// Rolling Min-Max over the sentiment window.
    MinMax {
        /// Report `100 - score`.
        inverse: bool,
    },
    /// The raw transformed value, unscaled.
    Raw,
}

/// Window parameters for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct NormalizerSet {
    z_score: RollingZScoreConfig,
    min_max: RollingMinMaxConfig,
}

impl NormalizerSet {
    /// Creates the set from the Z window and the Min-Max window parameters.
    #[must_use]
    pub const fn new(z_window: usize, min_max_window: usize, min_periods: usize) -> Self {
        Self {
            z_score: RollingZScoreConfig { window: z_window },
            min_max: RollingMinMaxConfig {
                window: min_max_window,
                min_periods,
                inverse: false,
            },
        }
    }

    /// Returns the normalizer for a component, or `None` for raw output.
    #[must_use]
    pub fn for_kind(&self, kind: Normalization) -> Option<Box<dyn Normalizer>> {
        match kind {
            Normalization::ZScore => Some(Box::new(RollingZScore::new(self.z_score))),
            Normalization::MinMax { inverse } => Some(Box::new(RollingMinMax::new(
                RollingMinMaxConfig {
                    inverse,
                    ..self.min_max
                },
            ))),
            Normalization::Raw => None,
        }
    }
}

impl Default for NormalizerSet {
    fn default() -> Self {
        Self {
            z_score: RollingZScoreConfig::default(),
            min_max: RollingMinMaxConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_kind() {
        let set = NormalizerSet::new(60, 120, 10);

        let z = set.for_kind(Normalization::ZScore).unwrap();
        assert_eq!(z.name(), "rolling_zscore");
        assert_eq!(z.warm_up(), 60);

        let mm = set.for_kind(Normalization::MinMax { inverse: true }).unwrap();
        assert_eq!(mm.name(), "rolling_minmax_inverse");
        assert_eq!(mm.warm_up(), 10);

        assert!(set.for_kind(Normalization::Raw).is_none());
    }
}
