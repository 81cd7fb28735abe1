//! Leading inter-market ratios.

use super::{ComponentSpec, Transform};
use crate::normalize::Normalization;
use crate::registry::IndexKind;

/// Copper / gold.
pub const Z_COPPERGOLD: ComponentSpec = ComponentSpec {
    name: "z_coppergold",
    index: IndexKind::Leading,
    description: "Copper over gold futures (HG=F/GC=F), rolling Z-score",
    transform: Transform::Ratio {
        numerator: "HG=F",
        denominator: "GC=F",
    },
    normalization: Normalization::ZScore,
};

/// High beta / low volatility.
pub const Z_BETAVOL: ComponentSpec = ComponentSpec {
    name: "z_betavol",
    index: IndexKind::Leading,
    description: "High beta over low volatility (SPHB/SPLV), rolling Z-score",
    transform: Transform::Ratio {
        numerator: "SPHB",
        denominator: "SPLV",
    },
    normalization: Normalization::ZScore,
};

/// 10y - 2y Treasury spread.
pub const Z_YIELDSPREAD: ComponentSpec = ComponentSpec {
    name: "z_yieldspread",
    index: IndexKind::Leading,
    description: "10y minus 2y Treasury spread, rolling Z-score",
    transform: Transform::Level("T10Y2Y"),
    normalization: Normalization::ZScore,
};

/// Leading components in record order.
pub fn components() -> Vec<ComponentSpec> {
    vec![Z_COPPERGOLD, Z_BETAVOL, Z_YIELDSPREAD]
}
