//! Statistical utility functions for rolling normalization.
//!
//! These helpers work on windows of an aligned column where `None` marks an
//! undefined position. They never divide by a zero (or near-zero) spread:
//! callers receive `None` instead.

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Mean and sample standard deviation of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Arithmetic mean of the window.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator).
    pub std: f64,
}

impl WindowStats {
    /// Z-score of `value` against these statistics.
    ///
    /// Returns `None` when the standard deviation is below
    /// [`MIN_STD_THRESHOLD`].
    #[must_use]
    pub fn z_score(&self, value: f64) -> Option<f64> {
        (self.std > MIN_STD_THRESHOLD).then(|| (value - self.mean) / self.std)
    }
}

/// Mean and sample standard deviation of a fully defined window.
///
/// Returns `None` if the window is empty or any position is undefined or
/// non-finite. A single-element window has `std == 0.0`.
///
/// # Examples
///
/// ```
/// use barometer_traits::stats::window_stats;
///
/// let stats = window_stats(&[Some(1.0), Some(2.0), Some(3.0)]).unwrap();
/// assert!((stats.mean - 2.0).abs() < 1e-12);
/// assert!((stats.std - 1.0).abs() < 1e-12);
/// assert!(window_stats(&[Some(1.0), None]).is_none());
/// ```
pub fn window_stats(window: &[Option<f64>]) -> Option<WindowStats> {
    if window.is_empty() {
        return None;
    }

    let mut values = Vec::with_capacity(window.len());
    for v in window {
        match v {
            Some(x) if x.is_finite() => values.push(*x),
            _ => return None,
        }
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    // Sample variance with N-1 denominator (Bessel's correction)
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Some(WindowStats {
        mean,
        std: variance.sqrt(),
    })
}

/// Minimum and maximum over the defined positions of a window.
///
/// Returns the extrema together with the number of defined samples, or
/// `None` when no position is defined.
pub fn window_min_max(window: &[Option<f64>]) -> Option<(f64, f64, usize)> {
    let mut count = 0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for x in window.iter().flatten().filter(|x| x.is_finite()) {
        count += 1;
        min = min.min(*x);
        max = max.max(*x);
    }

    (count > 0).then_some((min, max, count))
}

/// Simple moving average over the trailing `period` positions ending at each
/// index. Undefined until `period` consecutive defined values are available.
pub fn simple_moving_average(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|t| {
            if t + 1 < period {
                return None;
            }
            window_stats(&values[t + 1 - period..=t]).map(|s| s.mean)
        })
        .collect()
}
