//! Calendar alignment of independently sourced series.
//!
//! The primary series (daily trading-day closes) defines the calendar. Every
//! auxiliary series, whatever its native frequency, is mapped onto that
//! calendar with an as-of join: each calendar date takes the last defined
//! observation published on or before it. This is the same as resampling to
//! daily with forward-fill, reindexing onto the calendar and forward-filling
//! again. Values are never carried backwards, so dates before a series' first
//! observation stay undefined.

use std::collections::BTreeSet;

use polars::prelude::*;
use tracing::{debug, warn};

use barometer_traits::{BarometerError, Date, RawSeries, Result, SeriesId};

/// Name of the calendar column in [`AlignedFrame::data`].
pub const DATE_COLUMN: &str = "date";

/// An auxiliary input to the aligner.
///
/// `series` is `None` when the provider omitted the series entirely.
#[derive(Debug, Clone, Copy)]
pub struct AuxiliarySeries<'a> {
    /// Series identifier, used as the column name.
    pub name: &'a str,
    /// Whether absence of this series aborts the run.
    pub critical: bool,
    /// The fetched series, if the provider returned one.
    pub series: Option<&'a RawSeries>,
}

/// Series values on a common daily calendar.
///
/// Wraps a Polars DataFrame with a `date` column plus one nullable `f64`
/// column per series, and remembers which non-critical series were absent
/// from the fetch so downstream composites can degrade instead of failing.
#[derive(Debug, Clone)]
pub struct AlignedFrame {
    calendar: Vec<Date>,
    data: DataFrame,
    absent: BTreeSet<SeriesId>,
}

impl AlignedFrame {
    /// Builds a frame from already aligned columns.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::InvalidData`] if a column length differs from
    /// the calendar length, or a Polars error for duplicate column names.
    pub fn from_columns(
        calendar: Vec<Date>,
        columns: Vec<(String, Vec<Option<f64>>)>,
        absent: BTreeSet<SeriesId>,
    ) -> Result<Self> {
        let mut frame_columns = Vec::with_capacity(columns.len() + 1);
        frame_columns.push(Column::new(DATE_COLUMN.into(), calendar.as_slice()));

        for (name, values) in columns {
            if values.len() != calendar.len() {
                return Err(BarometerError::InvalidData(format!(
                    "column '{name}' has {} rows, calendar has {}",
                    values.len(),
                    calendar.len()
                )));
            }
            frame_columns.push(Column::new(name.as_str().into(), values));
        }

        Ok(Self {
            calendar,
            data: DataFrame::new(frame_columns)?,
            absent,
        })
    }

    /// Returns the calendar dates, ascending.
    pub fn calendar(&self) -> &[Date] {
        &self.calendar
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Returns the number of calendar rows.
    pub const fn len(&self) -> usize {
        self.calendar.len()
    }

    /// Returns whether the calendar is empty.
    pub const fn is_empty(&self) -> bool {
        self.calendar.is_empty()
    }

    /// Checks if a series column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Returns the series column names (excluding the date column).
    pub fn series_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .filter(|s| s.as_str() != DATE_COLUMN)
            .map(|s| s.to_string())
            .collect()
    }

    /// Gets a series column as optional values, one per calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::MissingColumn`] if no such series exists.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if name == DATE_COLUMN || !self.has_column(name) {
            return Err(BarometerError::MissingColumn(name.to_string()));
        }

        let values = self
            .data
            .column(name)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect();
        Ok(values)
    }

    /// Whether a non-critical series was absent from the fetch result.
    pub fn is_absent(&self, name: &str) -> bool {
        self.absent.contains(name)
    }

    /// Returns the absent non-critical series.
    pub const fn absent(&self) -> &BTreeSet<SeriesId> {
        &self.absent
    }
}

/// Maps raw series of mixed frequency onto the primary series' calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAligner;

impl SeriesAligner {
    /// Creates a new aligner.
    pub const fn new() -> Self {
        Self
    }

    /// Aligns the auxiliary series onto the calendar of `primary`.
    ///
    /// The primary series becomes a column of its own (forward-filled across
    /// its own missing markers). An auxiliary series whose name equals the
    /// primary's is skipped.
    ///
    /// # Errors
    ///
    /// - [`BarometerError::MissingSeries`] if the primary series has no
    ///   dates, or a critical auxiliary series is absent or carries no value.
    pub fn align(
        &self,
        primary: &RawSeries,
        auxiliary: &[AuxiliarySeries<'_>],
    ) -> Result<AlignedFrame> {
        if primary.is_empty() || !primary.has_values() {
            return Err(BarometerError::MissingSeries(format!(
                "{} (primary calendar series)",
                primary.name()
            )));
        }

        let calendar = primary.dates();
        let mut columns = Vec::with_capacity(auxiliary.len() + 1);
        let mut absent = BTreeSet::new();
        columns.push((
            primary.name().to_string(),
            forward_fill_onto(&calendar, primary),
        ));

        for aux in auxiliary {
            if aux.name == primary.name() || columns.iter().any(|(name, _)| name == aux.name) {
                continue;
            }

            match aux.series.filter(|s| s.has_values()) {
                Some(series) => {
                    debug!(
                        series = aux.name,
                        observations = series.len(),
                        "aligning series onto calendar"
                    );
                    columns.push((aux.name.to_string(), forward_fill_onto(&calendar, series)));
                }
                None if aux.critical => {
                    return Err(BarometerError::MissingSeries(aux.name.to_string()));
                }
                None => {
                    warn!(
                        series = aux.name,
                        "non-critical series absent from fetch result; dependent components are dropped"
                    );
                    absent.insert(aux.name.to_string());
                    columns.push((aux.name.to_string(), vec![None; calendar.len()]));
                }
            }
        }

        AlignedFrame::from_columns(calendar, columns, absent)
    }
}

/// As-of join of `series` onto `calendar` (both ascending).
///
/// Each calendar date receives the most recent defined value observed on or
/// before it. Missing markers in the source never overwrite an earlier value.
pub fn forward_fill_onto(calendar: &[Date], series: &RawSeries) -> Vec<Option<f64>> {
    let observations = series.observations();
    let mut next = 0;
    let mut last = None;

    calendar
        .iter()
        .map(|day| {
            while next < observations.len() && observations[next].date <= *day {
                if let Some(value) = observations[next].value {
                    last = Some(value);
                }
                next += 1;
            }
            last
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use barometer_traits::Observation;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn primary() -> RawSeries {
        // trading days with a holiday gap on the 8th
        RawSeries::from_pairs(
            "SPY",
            [
                (d(4), 500.0),
                (d(5), 501.0),
                (d(6), 502.0),
                (d(7), 503.0),
                (d(11), 504.0),
            ],
        )
    }

    #[test]
    fn test_weekly_series_forward_fills() {
        let weekly = RawSeries::from_pairs("WALCL", [(d(6), 7_500_000.0), (d(13), 7_400_000.0)]);
        let filled = forward_fill_onto(&primary().dates(), &weekly);
        assert_eq!(
            filled,
            vec![None, None, Some(7_500_000.0), Some(7_500_000.0), Some(7_500_000.0)]
        );
    }

    #[test]
    fn test_weekend_observation_carries_into_next_trading_day() {
        let irregular = RawSeries::from_pairs("IPMAN", [(d(9), 101.0)]);
        let filled = forward_fill_onto(&primary().dates(), &irregular);
        assert_eq!(filled[3], None);
        assert_eq!(filled[4], Some(101.0));
    }

    #[test]
    fn test_missing_markers_do_not_overwrite() {
        let series = RawSeries::new(
            "T10Y2Y",
            vec![
                Observation::new(d(4), 0.25),
                Observation::missing(d(5)),
                Observation::new(d(7), 0.30),
            ],
        );
        let filled = forward_fill_onto(&primary().dates(), &series);
        assert_eq!(
            filled,
            vec![Some(0.25), Some(0.25), Some(0.25), Some(0.30), Some(0.30)]
        );
    }

    #[test]
    fn test_never_looks_ahead() {
        let late = RawSeries::from_pairs("DBC", [(d(7), 22.0)]);
        let filled = forward_fill_onto(&primary().dates(), &late);
        assert!(filled[..3].iter().all(Option::is_none));
        assert_eq!(filled[3], Some(22.0));
    }

    #[test]
    fn test_align_builds_frame() {
        let vix = RawSeries::from_pairs("^VIX", [(d(4), 14.0), (d(11), 15.0)]);
        let frame = SeriesAligner::new()
            .align(
                &primary(),
                &[AuxiliarySeries {
                    name: "^VIX",
                    critical: true,
                    series: Some(&vix),
                }],
            )
            .unwrap();

        assert_eq!(frame.len(), 5);
        assert_eq!(frame.calendar()[4], d(11));
        assert!(frame.has_column("SPY"));
        assert_eq!(
            frame.column("^VIX").unwrap(),
            vec![Some(14.0), Some(14.0), Some(14.0), Some(14.0), Some(15.0)]
        );
        assert!(frame.absent().is_empty());
        assert_eq!(frame.series_names(), vec!["SPY".to_string(), "^VIX".to_string()]);
    }

    #[test]
    fn test_missing_critical_series_is_fatal() {
        let result = SeriesAligner::new().align(
            &primary(),
            &[AuxiliarySeries {
                name: "^VIX",
                critical: true,
                series: None,
            }],
        );

        match result {
            Err(BarometerError::MissingSeries(name)) => assert_eq!(name, "^VIX"),
            other => panic!("expected MissingSeries, got {other:?}"),
        }
    }

    #[test]
    fn test_critical_series_without_values_is_fatal() {
        let blank = RawSeries::new("DBC", vec![Observation::missing(d(4))]);
        let result = SeriesAligner::new().align(
            &primary(),
            &[AuxiliarySeries {
                name: "DBC",
                critical: true,
                series: Some(&blank),
            }],
        );
        assert!(matches!(result, Err(BarometerError::MissingSeries(_))));
    }

    #[test]
    fn test_missing_non_critical_series_is_marked_absent() {
        let frame = SeriesAligner::new()
            .align(
                &primary(),
                &[AuxiliarySeries {
                    name: "HG=F",
                    critical: false,
                    series: None,
                }],
            )
            .unwrap();

        assert!(frame.is_absent("HG=F"));
        assert!(frame.column("HG=F").unwrap().iter().all(Option::is_none));
    }

    #[test]
    fn test_empty_primary_is_fatal() {
        let result = SeriesAligner::new().align(&RawSeries::empty("SPY"), &[]);
        assert!(matches!(result, Err(BarometerError::MissingSeries(_))));
    }

    #[test]
    fn test_unknown_column() {
        let frame = SeriesAligner::new().align(&primary(), &[]).unwrap();
        assert!(matches!(
            frame.column("XLY"),
            Err(BarometerError::MissingColumn(_))
        ));
        assert!(matches!(
            frame.column(DATE_COLUMN),
            Err(BarometerError::MissingColumn(_))
        ));
    }
}
