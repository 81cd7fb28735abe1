//! Composite index construction from scored components.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use barometer_signals::{ComponentScore, IndexKind};
use barometer_traits::{BarometerError, Date, Result};

use crate::combiner::{Combiner, ScoreColumn, to_options};
use crate::equal_weight::EqualWeightCombiner;
use crate::fixed_weight::{FixedWeightCombiner, FixedWeightConfig};

/// How a composite weights its components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    /// Fixed `(component, weight)` pairs, weights summing to 1.
    Fixed(&'static [(&'static str, f64)]),
    /// Arithmetic mean of the listed components.
    Equal(&'static [&'static str]),
}

/// Formula for one composite index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeSpec {
    /// Which index this formula produces
    pub index: IndexKind,

    /// Component weighting
    pub weighting: Weighting,
}

impl CompositeSpec {
    /// Component names the composite reads, in formula order.
    pub fn inputs(&self) -> Vec<&'static str> {
        match self.weighting {
            Weighting::Fixed(terms) => terms.iter().map(|(name, _)| *name).collect(),
            Weighting::Equal(names) => names.to_vec(),
        }
    }

    fn combiner(&self) -> Box<dyn Combiner> {
        match self.weighting {
            Weighting::Fixed(terms) => Box::new(FixedWeightCombiner::new(
                FixedWeightConfig::from_pairs(terms),
            )),
            Weighting::Equal(_) => Box::new(EqualWeightCombiner::new()),
        }
    }
}

/// The five standard composites.
pub fn default_composites() -> Vec<CompositeSpec> {
    vec![
        CompositeSpec {
            index: IndexKind::Growth,
            weighting: Weighting::Fixed(&[("z_pmi", 0.5), ("z_ratio", 0.5)]),
        },
        CompositeSpec {
            index: IndexKind::Inflation,
            weighting: Weighting::Fixed(&[("z_t5yifr", 0.5), ("z_commodity", 0.5)]),
        },
        CompositeSpec {
            index: IndexKind::Liquidity,
            weighting: Weighting::Fixed(&[("z_net_liquidity", 1.0)]),
        },
        CompositeSpec {
            index: IndexKind::Sentiment,
            weighting: Weighting::Equal(&[
                "score_momentum",
                "score_vix",
                "score_putcall",
                "score_safehaven",
                "score_junk",
            ]),
        },
        CompositeSpec {
            index: IndexKind::Leading,
            weighting: Weighting::Equal(&["z_coppergold", "z_betavol", "z_yieldspread"]),
        },
    ]
}

/// Combines component scores into composite indices.
///
/// A composite row is defined only where every contributing component is
/// defined. Components whose source series was absent from the fetch are
/// dropped from their composite and the remaining weights renormalized; a
/// composite with no contributing component left is an error.
#[derive(Debug, Clone)]
pub struct IndexComposer {
    composites: Vec<CompositeSpec>,
}

impl IndexComposer {
    /// Create a composer for the given formulas.
    pub const fn new(composites: Vec<CompositeSpec>) -> Self {
        Self { composites }
    }

    /// Returns the composite formulas.
    pub fn composites(&self) -> &[CompositeSpec] {
        &self.composites
    }

    /// Computes every composite over the calendar.
    ///
    /// # Errors
    ///
    /// - [`BarometerError::InvalidData`] if a component column length differs
    ///   from the calendar length.
    /// - [`BarometerError::MissingColumn`] if a formula names a component that
    ///   was not scored.
    /// - [`BarometerError::InsufficientData`] if every component of a
    ///   composite was absent.
    pub fn compose(
        &self,
        calendar: Vec<Date>,
        components: Vec<ComponentScore>,
    ) -> Result<ScoreFrame> {
        if let Some(bad) = components.iter().find(|c| c.values.len() != calendar.len()) {
            return Err(BarometerError::InvalidData(format!(
                "component '{}' has {} rows, calendar has {}",
                bad.name,
                bad.values.len(),
                calendar.len()
            )));
        }

        let mut indices = BTreeMap::new();
        let mut dropped = BTreeSet::new();

        for spec in &self.composites {
            let mut columns = Vec::new();
            for name in spec.inputs() {
                let component = components
                    .iter()
                    .find(|c| c.name == name)
                    .ok_or_else(|| {
                        BarometerError::MissingColumn(format!(
                            "{name} (required by {} index)",
                            spec.index
                        ))
                    })?;

                if component.available {
                    columns.push(ScoreColumn::from_options(name, &component.values));
                } else {
                    warn!(
                        index = %spec.index,
                        component = name,
                        "component dropped from composite; weights renormalized"
                    );
                    dropped.insert(name.to_string());
                }
            }

            if columns.is_empty() {
                return Err(BarometerError::InsufficientData(format!(
                    "{} index: every component is absent",
                    spec.index
                )));
            }

            let combiner = spec.combiner();
            let values = to_options(&combiner.combine(&columns)?);
            debug!(
                index = %spec.index,
                combiner = combiner.name(),
                components = columns.len(),
                first_defined = ?values.iter().position(Option::is_some),
                "composed index"
            );
            indices.insert(spec.index, values);
        }

        info!(
            indices = indices.len(),
            rows = calendar.len(),
            dropped = dropped.len(),
            "composed indices"
        );

        Ok(ScoreFrame {
            calendar,
            indices,
            components,
            dropped,
        })
    }
}

impl Default for IndexComposer {
    fn default() -> Self {
        Self::new(default_composites())
    }
}

/// Composite and component columns over the calendar.
#[derive(Debug, Clone)]
pub struct ScoreFrame {
    calendar: Vec<Date>,
    indices: BTreeMap<IndexKind, Vec<Option<f64>>>,
    components: Vec<ComponentScore>,
    dropped: BTreeSet<String>,
}

impl ScoreFrame {
    /// Returns the calendar dates.
    pub fn calendar(&self) -> &[Date] {
        &self.calendar
    }

    /// Returns a composite column.
    pub fn index(&self, kind: IndexKind) -> Option<&[Option<f64>]> {
        self.indices.get(&kind).map(Vec::as_slice)
    }

    /// Returns a component column.
    pub fn component(&self, name: &str) -> Option<&[Option<f64>]> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Components dropped from their composite because their input was absent.
    pub const fn dropped(&self) -> &BTreeSet<String> {
        &self.dropped
    }

    fn row_complete(&self, row: usize) -> bool {
        !self.indices.is_empty() && self.indices.values().all(|values| values[row].is_some())
    }

    /// First row where every composite is defined.
    pub fn first_valid_row(&self) -> Option<usize> {
        (0..self.calendar.len()).find(|&row| self.row_complete(row))
    }

    /// Last row where every composite is defined.
    pub fn latest_row(&self) -> Option<usize> {
        (0..self.calendar.len()).rev().find(|&row| self.row_complete(row))
    }

    /// Extracts the latest fully defined row.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::InsufficientData`] if no row has every
    /// composite defined.
    pub fn latest(&self) -> Result<Snapshot> {
        let row = self.latest_row().ok_or_else(|| {
            let undefined: Vec<String> = self
                .indices
                .iter()
                .filter(|(_, values)| values.iter().all(Option::is_none))
                .map(|(kind, _)| kind.to_string())
                .collect();
            BarometerError::InsufficientData(if undefined.is_empty() {
                format!(
                    "no date among {} rows has every index defined",
                    self.calendar.len()
                )
            } else {
                format!("never defined: {}", undefined.join(", "))
            })
        })?;

        let mut values = BTreeMap::new();
        for (kind, column) in &self.indices {
            values.insert(kind.column().to_string(), column[row]);
        }
        for component in &self.components {
            values.insert(component.name.clone(), component.values[row]);
        }

        Ok(Snapshot {
            date: self.calendar[row],
            values,
        })
    }
}

/// Every composite and component value on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    date: Date,
    values: BTreeMap<String, Option<f64>>,
}

impl Snapshot {
    /// Returns the snapshot date.
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns a value by column name (composite column or component name).
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }

    /// Returns a composite value.
    pub fn index(&self, kind: IndexKind) -> Option<f64> {
        self.get(kind.column())
    }

    /// Returns all named values.
    pub const fn values(&self) -> &BTreeMap<String, Option<f64>> {
        &self.values
    }
}
