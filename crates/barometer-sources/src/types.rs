//! Response types for the provider APIs.

use serde::{Deserialize, Serialize};

/// FRED `series/observations` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredObservations {
    /// Observations in ascending date order.
    #[serde(default)]
    pub observations: Vec<FredObservation>,
}

/// One FRED observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredObservation {
    /// Date (YYYY-MM-DD).
    pub date: String,
    /// Value as text; `"."` marks a missing observation.
    pub value: String,
}

/// FRED error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredError {
    /// HTTP-like error code.
    #[serde(default)]
    pub error_code: u16,
    /// Human-readable message.
    pub error_message: String,
}

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// Chart envelope.
    pub chart: ChartEnvelope,
}

/// Result or error of a chart request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    /// Chart data, absent on error.
    pub result: Option<Vec<ChartData>>,
    /// Error, absent on success.
    pub error: Option<ChartError>,
}

/// Chart error.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    /// Error code (`"Not Found"` for unknown symbols).
    pub code: String,
    /// Error description.
    #[serde(default)]
    pub description: String,
}

/// Chart series for one symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartData {
    /// Bar timestamps (seconds since the epoch).
    pub timestamp: Option<Vec<i64>>,
    /// Price indicators.
    pub indicators: Indicators,
}

/// Indicator arrays aligned with the timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    /// Raw quote arrays.
    #[serde(default)]
    pub quote: Vec<QuoteData>,
    /// Adjusted closes, when requested.
    pub adjclose: Option<Vec<AdjCloseData>>,
}

/// Raw closes.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteData {
    /// Close prices, `null` for missing bars.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Adjusted closes.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjCloseData {
    /// Adjusted close prices, `null` for missing bars.
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
