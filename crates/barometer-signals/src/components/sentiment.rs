//! Fear & greed components, each a rolling Min-Max score on 0-100.
//!
//! Higher always means greedier: inputs where a high reading signals fear
//! (volatility, put/call, credit spreads) are scored inverted.

use super::{ComponentSpec, Transform};
use crate::normalize::Normalization;
use crate::registry::IndexKind;

/// Moving average length for the momentum gauge.
pub const MOMENTUM_PERIOD: usize = 125;

/// Return horizon for the safe-haven gauge.
pub const SAFE_HAVEN_PERIOD: usize = 20;

/// S&P 500 distance from its 125-day average.
pub const SCORE_MOMENTUM: ComponentSpec = ComponentSpec {
    name: "score_momentum",
    index: IndexKind::Sentiment,
    description: "SPY relative to its 125-day moving average",
    transform: Transform::MovingAverageGap {
        series: "SPY",
        period: MOMENTUM_PERIOD,
    },
    normalization: Normalization::MinMax { inverse: false },
};

/// Implied volatility, inverted.
pub const SCORE_VIX: ComponentSpec = ComponentSpec {
    name: "score_vix",
    index: IndexKind::Sentiment,
    description: "VIX level, inverted",
    transform: Transform::Level("^VIX"),
    normalization: Normalization::MinMax { inverse: true },
};

/// Equity put/call ratio, inverted.
pub const SCORE_PUTCALL: ComponentSpec = ComponentSpec {
    name: "score_putcall",
    index: IndexKind::Sentiment,
    description: "CBOE equity put/call ratio, inverted",
    transform: Transform::Level("^CPCE"),
    normalization: Normalization::MinMax { inverse: true },
};

/// Stocks versus Treasuries over 20 days.
pub const SCORE_SAFEHAVEN: ComponentSpec = ComponentSpec {
    name: "score_safehaven",
    index: IndexKind::Sentiment,
    description: "20-day SPY return minus 20-day TLT return",
    transform: Transform::ReturnSpread {
        long: "SPY",
        short: "TLT",
        period: SAFE_HAVEN_PERIOD,
    },
    normalization: Normalization::MinMax { inverse: false },
};

/// High-yield option-adjusted spread, inverted.
pub const SCORE_JUNK: ComponentSpec = ComponentSpec {
    name: "score_junk",
    index: IndexKind::Sentiment,
    description: "High-yield OAS, inverted",
    transform: Transform::Level("BAMLH0A0HYM2"),
    normalization: Normalization::MinMax { inverse: true },
};

/// Sentiment components in record order.
pub fn components() -> Vec<ComponentSpec> {
    vec![
        SCORE_MOMENTUM,
        SCORE_VIX,
        SCORE_PUTCALL,
        SCORE_SAFEHAVEN,
        SCORE_JUNK,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fear_gauges_are_inverted() {
        for spec in [SCORE_VIX, SCORE_PUTCALL, SCORE_JUNK] {
            assert_eq!(spec.normalization, Normalization::MinMax { inverse: true });
        }
        for spec in [SCORE_MOMENTUM, SCORE_SAFEHAVEN] {
            assert_eq!(spec.normalization, Normalization::MinMax { inverse: false });
        }
    }
}
