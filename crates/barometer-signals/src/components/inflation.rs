//! Inflation components.

use super::{ComponentSpec, Transform};
use crate::normalize::Normalization;
use crate::registry::IndexKind;

/// 5-year, 5-year forward inflation expectation, Z-scored.
pub const Z_T5YIFR: ComponentSpec = ComponentSpec {
    name: "z_t5yifr",
    index: IndexKind::Inflation,
    description: "5y5y forward inflation expectation, rolling Z-score",
    transform: Transform::Level("T5YIFR"),
    normalization: Normalization::ZScore,
};

/// Broad commodity fund, Z-scored.
pub const Z_COMMODITY: ComponentSpec = ComponentSpec {
    name: "z_commodity",
    index: IndexKind::Inflation,
    description: "Commodity index fund (DBC), rolling Z-score",
    transform: Transform::Level("DBC"),
    normalization: Normalization::ZScore,
};

/// Inflation components in record order.
pub fn components() -> Vec<ComponentSpec> {
    vec![Z_T5YIFR, Z_COMMODITY]
}
