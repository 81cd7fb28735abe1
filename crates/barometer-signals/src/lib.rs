//! Series alignment, normalization and component scoring for barometer.
//!
//! This crate turns raw fetched series into scored component columns:
//! - [`align`]: maps mixed-frequency series onto the primary trading calendar
//! - [`normalize`]: rolling Z-score and rolling Min-Max normalizers
//! - [`components`]: how each growth, inflation, liquidity, sentiment and
//!   leading component is derived and scaled
//! - [`registry`]: the input series catalogue and index kinds
//!
//! # Example
//!
//! ```ignore
//! use barometer_signals::{SeriesAligner, components, normalize::NormalizerSet};
//!
//! let frame = SeriesAligner::new().align(&spy, &auxiliary)?;
//! let scores = components::score_components(
//!     &frame,
//!     &components::all_components(),
//!     &NormalizerSet::default(),
//! )?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod align;
pub mod components;
pub mod normalize;
pub mod registry;

// Re-export key types
pub use align::{AlignedFrame, AuxiliarySeries, SeriesAligner};
pub use components::{ComponentScore, ComponentSpec, Transform};
pub use normalize::{Normalization, NormalizerSet};
pub use registry::{IndexKind, PRIMARY_SERIES, SeriesInfo, SourceKind};
