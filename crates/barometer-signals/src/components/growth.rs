//! Growth components.
//!
//! Manufacturing production stands in for the ISM PMI, and consumer
//! discretionary over staples captures the market's cyclical appetite.

use super::{ComponentSpec, Transform};
use crate::normalize::Normalization;
use crate::registry::IndexKind;

/// Industrial production: manufacturing, Z-scored.
pub const Z_PMI: ComponentSpec = ComponentSpec {
    name: "z_pmi",
    index: IndexKind::Growth,
    description: "Industrial production (manufacturing), rolling Z-score",
    transform: Transform::Level("IPMAN"),
    normalization: Normalization::ZScore,
};

/// XLY / XLP ratio, Z-scored.
pub const Z_RATIO: ComponentSpec = ComponentSpec {
    name: "z_ratio",
    index: IndexKind::Growth,
    description: "Consumer discretionary over staples (XLY/XLP), rolling Z-score",
    transform: Transform::Ratio {
        numerator: "XLY",
        denominator: "XLP",
    },
    normalization: Normalization::ZScore,
};

/// Growth components in record order.
pub fn components() -> Vec<ComponentSpec> {
    vec![Z_PMI, Z_RATIO]
}
