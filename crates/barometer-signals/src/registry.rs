//! Series registry for discovering and categorizing pipeline inputs.
//!
//! Every external series the pipeline fetches is listed here together with
//! its provider and its criticality. A critical series that is missing from
//! the fetch result aborts the run; a non-critical one only removes the
//! components built from it from their composite.

use serde::{Deserialize, Serialize};

/// Ticker whose trading days define the pipeline calendar.
pub const PRIMARY_SERIES: &str = "SPY";

/// Composite index classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndexKind {
    /// Real-activity momentum
    Growth,
    /// Price-pressure expectations
    Inflation,
    /// Central-bank balance-sheet liquidity
    Liquidity,
    /// Fear/greed positioning
    Sentiment,
    /// Inter-market ratios that tend to turn early
    Leading,
}

impl IndexKind {
    /// All indices in record order.
    pub const ALL: [Self; 5] = [
        Self::Growth,
        Self::Inflation,
        Self::Liquidity,
        Self::Sentiment,
        Self::Leading,
    ];

    /// Column name of the composite in score frames and history records.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Growth => "growth_index",
            Self::Inflation => "inflation_index",
            Self::Liquidity => "liquidity_index",
            Self::Sentiment => "sentiment_index",
            Self::Leading => "leading_index",
        }
    }

    /// Get a human-readable description of the index.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Growth => "Manufacturing activity and cyclical equity leadership",
            Self::Inflation => "Market-implied inflation expectations and commodity prices",
            Self::Liquidity => "Fed balance sheet net of the Treasury account and reverse repo",
            Self::Sentiment => "Fear & greed gauge on a 0-100 scale",
            Self::Leading => "Copper/gold, high-beta/low-vol and yield-curve signals",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Growth => "Growth",
            Self::Inflation => "Inflation",
            Self::Liquidity => "Liquidity",
            Self::Sentiment => "Sentiment",
            Self::Leading => "Leading",
        };
        f.write_str(label)
    }
}

/// Which external collaborator provides a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Daily closes from the market data source.
    Market,
    /// Macro series from the macro data source.
    Macro,
}

/// Metadata about an input series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Ticker or macro series identifier
    pub id: &'static str,

    /// Provider of the series
    pub source: SourceKind,

    /// Whether absence of the series aborts the run
    pub critical: bool,

    /// Human-readable description
    pub description: &'static str,
}

/// Get information about all input series.
#[must_use]
pub fn available_series() -> Vec<SeriesInfo> {
    vec![
        // Market closes
        SeriesInfo {
            id: PRIMARY_SERIES,
            source: SourceKind::Market,
            critical: true,
            description: "S&P 500 ETF; defines the trading calendar",
        },
        SeriesInfo {
            id: "XLY",
            source: SourceKind::Market,
            critical: true,
            description: "Consumer discretionary sector ETF (cyclical)",
        },
        SeriesInfo {
            id: "XLP",
            source: SourceKind::Market,
            critical: true,
            description: "Consumer staples sector ETF (defensive)",
        },
        SeriesInfo {
            id: "DBC",
            source: SourceKind::Market,
            critical: true,
            description: "Broad commodity index ETF",
        },
        SeriesInfo {
            id: "^VIX",
            source: SourceKind::Market,
            critical: true,
            description: "CBOE volatility index",
        },
        SeriesInfo {
            id: "^CPCE",
            source: SourceKind::Market,
            critical: false,
            description: "CBOE equity put/call ratio",
        },
        SeriesInfo {
            id: "TLT",
            source: SourceKind::Market,
            critical: true,
            description: "20+ year Treasury bond ETF",
        },
        SeriesInfo {
            id: "HG=F",
            source: SourceKind::Market,
            critical: false,
            description: "Copper futures",
        },
        SeriesInfo {
            id: "GC=F",
            source: SourceKind::Market,
            critical: false,
            description: "Gold futures",
        },
        SeriesInfo {
            id: "SPHB",
            source: SourceKind::Market,
            critical: false,
            description: "S&P 500 high beta ETF",
        },
        SeriesInfo {
            id: "SPLV",
            source: SourceKind::Market,
            critical: false,
            description: "S&P 500 low volatility ETF",
        },
        // Macro series
        SeriesInfo {
            id: "IPMAN",
            source: SourceKind::Macro,
            critical: true,
            description: "Industrial production: manufacturing (PMI proxy, monthly)",
        },
        SeriesInfo {
            id: "T5YIFR",
            source: SourceKind::Macro,
            critical: true,
            description: "5-year, 5-year forward inflation expectation rate",
        },
        SeriesInfo {
            id: "WALCL",
            source: SourceKind::Macro,
            critical: true,
            description: "Fed total assets, millions USD (weekly)",
        },
        SeriesInfo {
            id: "WTREGEN",
            source: SourceKind::Macro,
            critical: true,
            description: "Treasury General Account, millions USD (weekly)",
        },
        SeriesInfo {
            id: "RRPONTSYD",
            source: SourceKind::Macro,
            critical: true,
            description: "Overnight reverse repurchase agreements, billions USD",
        },
        SeriesInfo {
            id: "BAMLH0A0HYM2",
            source: SourceKind::Macro,
            critical: true,
            description: "ICE BofA US high yield option-adjusted spread",
        },
        SeriesInfo {
            id: "T10Y2Y",
            source: SourceKind::Macro,
            critical: false,
            description: "10-year minus 2-year Treasury constant maturity spread",
        },
    ]
}

/// Get information about a specific series by id.
#[must_use]
pub fn get_series_info(id: &str) -> Option<SeriesInfo> {
    available_series().into_iter().find(|info| info.id == id)
}

/// Get all series served by one provider.
#[must_use]
pub fn series_by_source(source: SourceKind) -> Vec<SeriesInfo> {
    available_series()
        .into_iter()
        .filter(|info| info.source == source)
        .collect()
}

/// Whether absence of the series aborts the run.
///
/// Unknown ids are treated as critical.
#[must_use]
pub fn is_critical(id: &str) -> bool {
    get_series_info(id).is_none_or(|info| info.critical)
}
