//! Rolling Z-score normalization.

use barometer_traits::{Normalizer, stats::window_stats};
use serde::{Deserialize, Serialize};

/// Configuration for the rolling Z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingZScoreConfig {
    /// Trailing window length in calendar rows (default: 252 ≈ 1 trading year)
    pub window: usize,
}

impl Default for RollingZScoreConfig {
    fn default() -> Self {
        Self { window: 252 }
    }
}

/// Rolling Z-score over a trailing window.
///
/// At row `t` the score is `(v[t] - mean) / std` where mean and sample
/// standard deviation are taken over `v[t-W+1..=t]`. The score is undefined
/// while fewer than `W` rows exist, when any value inside the window is
/// undefined, or when the window has zero variance.
///
/// # Example
///
/// ```
/// use barometer_signals::normalize::{RollingZScore, RollingZScoreConfig};
/// use barometer_traits::Normalizer;
///
/// let z = RollingZScore::new(RollingZScoreConfig { window: 3 });
/// let scores = z.normalize(&[Some(1.0), Some(2.0), Some(3.0), Some(3.0)]);
/// assert_eq!(scores[1], None);
/// assert!((scores[2].unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct RollingZScore {
    config: RollingZScoreConfig,
}

impl RollingZScore {
    /// Create a new rolling Z-score with the given configuration.
    #[must_use]
    pub const fn new(config: RollingZScoreConfig) -> Self {
        Self { config }
    }

    /// Get the window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }
}

impl Default for RollingZScore {
    fn default() -> Self {
        Self::new(RollingZScoreConfig::default())
    }
}

impl Normalizer for RollingZScore {
    fn name(&self) -> &str {
        "rolling_zscore"
    }

    fn normalize(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        let w = self.config.window;
        if w == 0 {
            return vec![None; values.len()];
        }

        (0..values.len())
            .map(|t| {
                if t + 1 < w {
                    return None;
                }
                let value = values[t]?;
                window_stats(&values[t + 1 - w..=t])?.z_score(value)
            })
            .collect()
    }

    fn warm_up(&self) -> usize {
        self.config.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(n: usize) -> Vec<Option<f64>> {
        (1..=n).map(|i| Some(i as f64)).collect()
    }

    #[test]
    fn test_default_config() {
        assert_eq!(RollingZScoreConfig::default().window, 252);
        assert_eq!(RollingZScore::default().warm_up(), 252);
    }

    #[test]
    fn test_undefined_until_window_full() {
        let z = RollingZScore::new(RollingZScoreConfig { window: 5 });
        let scores = z.normalize(&ramp(10));

        assert!(scores[..4].iter().all(Option::is_none));
        assert!(scores[4..].iter().all(Option::is_some));
    }

    #[test]
    fn test_linear_ramp_score() {
        // for a ramp the last value sits (W-1)/2 above the mean
        let z = RollingZScore::new(RollingZScoreConfig { window: 5 });
        let scores = z.normalize(&ramp(6));

        let std = 2.5_f64.sqrt();
        assert_relative_eq!(scores[4].unwrap(), 2.0 / std, epsilon = 1e-12);
        assert_relative_eq!(scores[5].unwrap(), 2.0 / std, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_is_undefined() {
        let z = RollingZScore::new(RollingZScoreConfig { window: 20 });
        let scores = z.normalize(&vec![Some(10.0); 50]);

        assert_eq!(scores.len(), 50);
        assert!(scores.iter().all(Option::is_none));
    }

    #[test]
    fn test_gap_in_window_is_undefined() {
        let z = RollingZScore::new(RollingZScoreConfig { window: 3 });
        let mut values = ramp(8);
        values[4] = None;
        let scores = z.normalize(&values);

        // rows 4, 5 and 6 see the gap
        assert!(scores[3].is_some());
        assert!(scores[4].is_none());
        assert!(scores[5].is_none());
        assert!(scores[6].is_none());
        assert!(scores[7].is_some());
    }

    #[test]
    fn test_zero_window_never_defined() {
        let z = RollingZScore::new(RollingZScoreConfig { window: 0 });
        assert!(z.normalize(&ramp(5)).iter().all(Option::is_none));
    }

    #[test]
    fn test_trailing_window_only() {
        // a spike in the future must not change earlier scores
        let z = RollingZScore::new(RollingZScoreConfig { window: 4 });
        let base = ramp(8);
        let mut spiked = base.clone();
        spiked[7] = Some(1_000.0);

        let a = z.normalize(&base);
        let b = z.normalize(&spiked);
        assert_eq!(a[..7], b[..7]);
        assert_ne!(a[7], b[7]);
    }
}
