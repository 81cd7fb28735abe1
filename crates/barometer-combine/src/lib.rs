//! Composite index construction for barometer.
//!
//! This crate combines scored components into the five composite indices.
//! Two combination strategies implement the [`Combiner`] trait: an
//! equal-weighted mean and a fixed-weight average. [`IndexComposer`] applies
//! one formula per index, degrading composites whose non-critical inputs were
//! absent, and [`ScoreFrame::latest`] extracts the most recent fully defined
//! row.
//!
//! # Examples
//!
//! ```rust,no_run
//! use barometer_combine::{Combiner, EqualWeightCombiner, ScoreColumn};
//!
//! let combiner = EqualWeightCombiner::new();
//! let columns = vec![
//!     ScoreColumn::from_options("z_coppergold", &[Some(0.5), Some(-0.2)]),
//!     ScoreColumn::from_options("z_betavol", &[Some(-0.3), Some(0.8)]),
//! ];
//!
//! let composite = combiner.combine(&columns).unwrap();
//! ```

mod combiner;
mod composer;
mod equal_weight;
mod fixed_weight;

// Re-export main types
pub use combiner::{Combiner, ScoreColumn, to_options};
pub use composer::{
    CompositeSpec, IndexComposer, ScoreFrame, Snapshot, Weighting, default_composites,
};
pub use equal_weight::EqualWeightCombiner;
pub use fixed_weight::{FixedWeightCombiner, FixedWeightConfig};
