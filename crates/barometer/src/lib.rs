#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barometer/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # barometer
//!
//! Daily composite market indices: growth, inflation, liquidity, sentiment
//! and leading.
//!
//! barometer is an umbrella crate that re-exports all barometer sub-crates and
//! adds the [`Pipeline`] that runs one daily update end to end.
//!
//! ## Quick Start
//!
//! ```ignore
//! use barometer::{Pipeline, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> barometer::Result<()> {
//!     let config = PipelineConfig {
//!         credential: std::env::var("FRED_API_KEY").ok(),
//!         ..PipelineConfig::default()
//!     };
//!     let pipeline = Pipeline::from_config(config)?;
//!     let today = chrono::Local::now().date_naive();
//!     let report = pipeline.run(today).await?;
//!     println!("{} -> {:?}", report.record.date(), report.outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Raw series, the [`Normalizer`] trait and the error taxonomy
//! - [`signals`] - Alignment, normalization and component scoring
//! - [`combine`] - Composite weighting and the [`IndexComposer`]
//! - [`store`] - The JSON history artifact
//! - [`sources`] - Yahoo Finance and FRED clients
//!
//! ## Architecture
//!
//! 1. **Sources** fetch market closes and macro series
//! 2. The **aligner** forward-fills everything onto the SPY trading calendar
//! 3. **Components** derive and normalize each input signal
//! 4. The **composer** weights components into the five indices
//! 5. The **store** merges the latest record into history

/// Version information for the barometer crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{FetchedSeries, Pipeline, RunReport};

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// - [`RawSeries`] - Dated observations as fetched
/// - [`Normalizer`] - Rolling column normalization
/// - [`BarometerError`] - Error taxonomy with process exit codes
pub mod traits {
    pub use barometer_traits::*;
}

pub use barometer_traits::{BarometerError, Date, Normalizer, RawSeries, Result};

// ============================================================================
// Signals
// ============================================================================

/// Series alignment, normalization and component definitions.
///
/// ## Components
///
/// | Index | Components |
/// |-------|------------|
/// | Growth | `z_pmi`, `z_ratio` |
/// | Inflation | `z_t5yifr`, `z_commodity` |
/// | Liquidity | `z_net_liquidity` |
/// | Sentiment | `score_momentum`, `score_vix`, `score_putcall`, `score_safehaven`, `score_junk` |
/// | Leading | `z_coppergold`, `z_betavol`, `z_yieldspread` |
///
/// Z-score components use a rolling window (252 days by default). Sentiment
/// components are scaled to 0-100 with a rolling Min-Max, inverted for the
/// fear gauges.
pub mod signals {
    pub use barometer_signals::*;
}

pub use barometer_signals::{IndexKind, SeriesAligner};

// ============================================================================
// Combination
// ============================================================================

/// Composite weighting.
///
/// Growth and inflation average their two components with fixed weights,
/// sentiment and leading take an equal-weight mean. When a non-critical input
/// is absent its component is dropped and the remaining weights are
/// renormalized.
pub mod combine {
    pub use barometer_combine::*;
}

pub use barometer_combine::{Combiner, IndexComposer, ScoreFrame, Snapshot};

// ============================================================================
// History
// ============================================================================

/// The history artifact.
///
/// A JSON array of positional records ordered by date, one per day, written
/// atomically. Older named-key artifacts are migrated on load.
pub mod store {
    pub use barometer_store::*;
}

pub use barometer_store::{HistoryRecord, HistoryStore};

// ============================================================================
// Data Providers
// ============================================================================

/// Market and macro data providers.
///
/// ## Setup
///
/// 1. Get a free FRED API key at <https://fred.stlouisfed.org/docs/api/api_key.html>
/// 2. Set the `FRED_API_KEY` environment variable or add to `.env` file
///
/// Yahoo Finance needs no key.
pub mod sources {
    pub use barometer_sources::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use barometer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BarometerError, Combiner, Date, HistoryRecord, HistoryStore, IndexKind, Normalizer,
        Pipeline, PipelineConfig, RawSeries, Result, Snapshot,
    };
    pub use barometer_sources::{MacroDataSource, MarketDataSource};
}

// ============================================================================
// Tests
// ============================================================================
