//! Common types used throughout the barometer pipeline.
//!
//! This module defines the raw time-series representation shared by the data
//! sources, the aligner and the tests.

use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// Identifier of an input series (a ticker such as `"SPY"` or a macro series
/// id such as `"WALCL"`).
pub type SeriesId = String;

/// A single dated value of a raw series.
///
/// `value` is `None` when the provider published a missing marker for that
/// date (FRED uses `"."`, Yahoo uses `null`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: Date,
    /// Observed value, if any.
    pub value: Option<f64>,
}

impl Observation {
    /// Creates a defined observation.
    #[must_use]
    pub const fn new(date: Date, value: f64) -> Self {
        Self {
            date,
            value: Some(value),
        }
    }

    /// Creates an observation carrying a missing marker.
    #[must_use]
    pub const fn missing(date: Date) -> Self {
        Self { date, value: None }
    }
}

/// An ordered sequence of observations for one named signal.
///
/// Construction sorts the observations ascending by date and keeps the last
/// value supplied for a duplicated date, so every `RawSeries` satisfies
/// strictly increasing dates. The series is immutable afterwards.
///
/// # Example
///
/// ```
/// use barometer_traits::{Date, Observation, RawSeries};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let series = RawSeries::new(
///     "DGS10",
///     vec![Observation::new(d(3), 4.1), Observation::new(d(2), 4.0)],
/// );
/// assert_eq!(series.first_date(), Some(d(2)));
/// assert_eq!(series.last_value(), Some(4.1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    name: SeriesId,
    observations: Vec<Observation>,
}

impl RawSeries {
    /// Creates a new series, normalizing order and duplicate dates.
    pub fn new(name: impl Into<SeriesId>, mut observations: Vec<Observation>) -> Self {
        // stable sort keeps supply order within a date, so the last one wins below
        observations.sort_by_key(|obs| obs.date);
        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }

        Self {
            name: name.into(),
            observations: deduped,
        }
    }

    /// Creates a series from `(date, value)` pairs.
    pub fn from_pairs(
        name: impl Into<SeriesId>,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> Self {
        let observations = pairs
            .into_iter()
            .map(|(date, value)| Observation::new(date, value))
            .collect();
        Self::new(name, observations)
    }

    /// Creates an empty series.
    pub fn empty(name: impl Into<SeriesId>) -> Self {
        Self {
            name: name.into(),
            observations: Vec::new(),
        }
    }

    /// Returns the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the observations in ascending date order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the number of observations, including missing markers.
    pub const fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns whether the series has no observations at all.
    pub const fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns whether at least one observation carries a value.
    pub fn has_values(&self) -> bool {
        self.observations.iter().any(|obs| obs.value.is_some())
    }

    /// Returns the earliest observation date.
    pub fn first_date(&self) -> Option<Date> {
        self.observations.first().map(|obs| obs.date)
    }

    /// Returns the latest observation date.
    pub fn last_date(&self) -> Option<Date> {
        self.observations.last().map(|obs| obs.date)
    }

    /// Returns the most recent defined value.
    pub fn last_value(&self) -> Option<f64> {
        self.observations.iter().rev().find_map(|obs| obs.value)
    }

    /// Returns the distinct dates of the series.
    pub fn dates(&self) -> Vec<Date> {
        self.observations.iter().map(|obs| obs.date).collect()
    }
}
