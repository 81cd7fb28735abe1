//! Fed net liquidity.
//!
//! Net liquidity is the Fed balance sheet less the Treasury General Account
//! and the overnight reverse repo facility, expressed in USD billions:
//!
//! ```text
//! net = WALCL / 1000 - WTREGEN / 1000 - RRPONTSYD
//! ```
//!
//! WALCL and WTREGEN are published in millions, RRPONTSYD in billions. The
//! level itself is stored alongside the scores; only its Z-score feeds the
//! liquidity index.

use super::{ComponentSpec, Transform};
use crate::normalize::Normalization;
use crate::registry::IndexKind;

const MILLIONS_TO_BILLIONS: f64 = 0.001;

/// Terms of the net liquidity sum.
pub const NET_LIQUIDITY_TERMS: &[(&str, f64)] = &[
    ("WALCL", MILLIONS_TO_BILLIONS),
    ("WTREGEN", -MILLIONS_TO_BILLIONS),
    ("RRPONTSYD", -1.0),
];

/// Net liquidity level in USD billions, unscaled.
pub const NET_LIQUIDITY_RAW: ComponentSpec = ComponentSpec {
    name: "net_liquidity_raw",
    index: IndexKind::Liquidity,
    description: "Fed balance sheet - TGA - reverse repo, USD billions",
    transform: Transform::Linear(NET_LIQUIDITY_TERMS),
    normalization: Normalization::Raw,
};

/// Net liquidity, Z-scored.
pub const Z_NET_LIQUIDITY: ComponentSpec = ComponentSpec {
    name: "z_net_liquidity",
    index: IndexKind::Liquidity,
    description: "Net liquidity, rolling Z-score",
    transform: Transform::Linear(NET_LIQUIDITY_TERMS),
    normalization: Normalization::ZScore,
};

/// Liquidity components in record order.
pub fn components() -> Vec<ComponentSpec> {
    vec![NET_LIQUIDITY_RAW, Z_NET_LIQUIDITY]
}
