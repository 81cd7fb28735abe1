//! Component definitions: how each scored input is derived from the aligned
//! frame and which normalization turns it into a score.
//!
//! Components are grouped by the composite index they feed:
//! - [`growth`]: manufacturing proxy and cyclical/defensive ratio
//! - [`inflation`]: forward inflation expectations and commodities
//! - [`liquidity`]: Fed net liquidity
//! - [`sentiment`]: fear & greed gauges on a 0-100 scale
//! - [`leading`]: inter-market ratios

pub mod growth;
pub mod inflation;
pub mod leading;
pub mod liquidity;
pub mod sentiment;

use serde::Serialize;
use tracing::debug;

use crate::align::AlignedFrame;
use crate::normalize::{Normalization, NormalizerSet};
use crate::registry::IndexKind;
use barometer_traits::{BarometerError, Result, stats::simple_moving_average};

/// Derivation of a raw component column from aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Transform {
    /// The series itself.
    Level(&'static str),
    /// `numerator / denominator`.
    Ratio {
        /// Numerator series
        numerator: &'static str,
        /// Denominator series
        denominator: &'static str,
    },
    /// Weighted sum of series, `Σ coefficient · series`.
    Linear(&'static [(&'static str, f64)]),
    /// `v / SMA(v, period) - 1`.
    MovingAverageGap {
        /// Input series
        series: &'static str,
        /// Moving average length in calendar rows
        period: usize,
    },
    /// Trailing `period`-row return of `long` minus that of `short`.
    ReturnSpread {
        /// Series whose return is added
        long: &'static str,
        /// Series whose return is subtracted
        short: &'static str,
        /// Return horizon in calendar rows
        period: usize,
    },
}

impl Transform {
    /// Series the transform reads.
    #[must_use]
    pub fn inputs(&self) -> Vec<&'static str> {
        match *self {
            Self::Level(series) | Self::MovingAverageGap { series, .. } => vec![series],
            Self::Ratio {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            Self::Linear(terms) => terms.iter().map(|(series, _)| *series).collect(),
            Self::ReturnSpread { long, short, .. } => vec![long, short],
        }
    }

    /// Applies the transform row by row.
    ///
    /// A row is undefined if any input it needs is undefined there, or if a
    /// division would be by zero.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::MissingColumn`] if an input series is not in
    /// the frame.
    pub fn apply(&self, frame: &AlignedFrame) -> Result<Vec<Option<f64>>> {
        match *self {
            Self::Level(series) => frame.column(series),
            Self::Ratio {
                numerator,
                denominator,
            } => {
                let num = frame.column(numerator)?;
                let den = frame.column(denominator)?;
                Ok(num
                    .iter()
                    .zip(&den)
                    .map(|(n, d)| ratio((*n)?, (*d)?))
                    .collect())
            }
            Self::Linear(terms) => {
                let columns = terms
                    .iter()
                    .map(|(series, coefficient)| Ok((frame.column(series)?, *coefficient)))
                    .collect::<Result<Vec<_>>>()?;
                Ok((0..frame.len())
                    .map(|t| {
                        columns
                            .iter()
                            .map(|(values, coefficient)| values[t].map(|v| v * coefficient))
                            .sum::<Option<f64>>()
                    })
                    .collect())
            }
            Self::MovingAverageGap { series, period } => {
                let values = frame.column(series)?;
                let average = simple_moving_average(&values, period);
                Ok(values
                    .iter()
                    .zip(&average)
                    .map(|(v, avg)| ratio((*v)?, (*avg)?).map(|r| r - 1.0))
                    .collect())
            }
            Self::ReturnSpread {
                long,
                short,
                period,
            } => {
                let long = trailing_returns(&frame.column(long)?, period);
                let short = trailing_returns(&frame.column(short)?, period);
                Ok(long
                    .iter()
                    .zip(&short)
                    .map(|(l, s)| Some((*l)? - (*s)?))
                    .collect())
            }
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0)
        .then(|| numerator / denominator)
        .filter(|r| r.is_finite())
}

fn trailing_returns(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|t| {
            let past = values[t.checked_sub(period)?]?;
            ratio(values[t]?, past).map(|r| r - 1.0)
        })
        .collect()
}

/// Definition of one scored component.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComponentSpec {
    /// Column name in score frames and history records
    pub name: &'static str,

    /// Composite index the component belongs to
    pub index: IndexKind,

    /// Human-readable description
    pub description: &'static str,

    /// Derivation from aligned series
    pub transform: Transform,

    /// Scaling applied to the derived column
    pub normalization: Normalization,
}

/// A computed component column.
#[derive(Debug, Clone)]
pub struct ComponentScore {
    /// Component name
    pub name: String,

    /// One value per calendar row
    pub values: Vec<Option<f64>>,

    /// `false` when an input series was absent from the fetch result
    pub available: bool,
}

impl ComponentScore {
    /// Index of the first defined row.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

/// Get all component definitions in record order.
#[must_use]
pub fn all_components() -> Vec<ComponentSpec> {
    let mut specs = growth::components();
    specs.extend(inflation::components());
    specs.extend(liquidity::components());
    specs.extend(sentiment::components());
    specs.extend(leading::components());
    specs
}

/// Get information about a specific component by name.
#[must_use]
pub fn get_component(name: &str) -> Option<ComponentSpec> {
    all_components().into_iter().find(|spec| spec.name == name)
}

/// Computes every component column over an aligned frame.
///
/// # Errors
///
/// Returns an error if a component reads a series that is not in the frame.
pub fn score_components(
    frame: &AlignedFrame,
    specs: &[ComponentSpec],
    normalizers: &NormalizerSet,
) -> Result<Vec<ComponentScore>> {
    specs
        .iter()
        .map(|spec| {
            let available = spec
                .transform
                .inputs()
                .iter()
                .all(|series| !frame.is_absent(series));
            let raw = spec.transform.apply(frame).map_err(|e| match e {
                BarometerError::MissingColumn(col) => BarometerError::MissingColumn(format!(
                    "{col} (required by component {})",
                    spec.name
                )),
                other => other,
            })?;
            let values = match normalizers.for_kind(spec.normalization) {
                Some(normalizer) => normalizer.normalize(&raw),
                None => raw,
            };

            let score = ComponentScore {
                name: spec.name.to_string(),
                values,
                available,
            };
            debug!(
                component = spec.name,
                available,
                first_defined = ?score.first_defined(),
                "scored component"
            );
            Ok(score)
        })
        .collect()
}
