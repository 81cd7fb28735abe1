#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barometer/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the barometer index pipeline.
//!
//! This crate provides the shared vocabulary of the workspace: raw series,
//! the [`Normalizer`] abstraction, rolling statistics and the error taxonomy
//! every stage reports through.

/// The version of the barometer-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod normalizer;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{BarometerError, Result};
pub use normalizer::Normalizer;
pub use types::{Date, Observation, RawSeries, SeriesId};
