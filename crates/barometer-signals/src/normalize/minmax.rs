//! Rolling Min-Max normalization onto a 0-100 scale.

use barometer_traits::{Normalizer, stats::window_min_max};
use serde::{Deserialize, Serialize};

/// Configuration for the rolling Min-Max score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingMinMaxConfig {
    /// Trailing window length in calendar rows (default: 252)
    pub window: usize,

    /// Defined samples required inside the window before scoring (default: 20)
    pub min_periods: usize,

    /// Report `100 - score`, for inputs where a high reading means fear
    pub inverse: bool,
}

impl Default for RollingMinMaxConfig {
    fn default() -> Self {
        Self {
            window: 252,
            min_periods: 20,
            inverse: false,
        }
    }
}

/// Rolling Min-Max score.
///
/// At row `t`, with `min`/`max` taken over the defined values of the trailing
/// window (partial windows allowed once `min_periods` samples exist), the
/// score is `100 * (v[t] - min) / (max - min)`. A flat window uses a
/// denominator of 1, so the score is 0 rather than a division failure.
/// Scores are not clamped.
#[derive(Debug, Clone)]
pub struct RollingMinMax {
    config: RollingMinMaxConfig,
}

impl RollingMinMax {
    /// Create a new rolling Min-Max score with the given configuration.
    #[must_use]
    pub const fn new(config: RollingMinMaxConfig) -> Self {
        Self { config }
    }

    /// Whether the score is reported inverted.
    #[must_use]
    pub const fn is_inverse(&self) -> bool {
        self.config.inverse
    }

    fn score_at(&self, values: &[Option<f64>], t: usize) -> Option<f64> {
        let value = values[t]?;
        let start = (t + 1).saturating_sub(self.config.window);
        let (min, max, count) = window_min_max(&values[start..=t])?;
        if count < self.config.min_periods {
            return None;
        }

        let range = if max > min { max - min } else { 1.0 };
        let score = 100.0 * ((value - min) / range);

        Some(if self.config.inverse {
            100.0 - score
        } else {
            score
        })
    }
}

impl Default for RollingMinMax {
    fn default() -> Self {
        Self::new(RollingMinMaxConfig::default())
    }
}

impl Normalizer for RollingMinMax {
    fn name(&self) -> &str {
        if self.config.inverse {
            "rolling_minmax_inverse"
        } else {
            "rolling_minmax"
        }
    }

    fn normalize(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        if self.config.window == 0 || self.config.min_periods == 0 {
            return vec![None; values.len()];
        }
        (0..values.len()).map(|t| self.score_at(values, t)).collect()
    }

    fn warm_up(&self) -> usize {
        self.config.min_periods
    }
}
