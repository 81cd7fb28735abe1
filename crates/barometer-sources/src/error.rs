//! Error types for the data source clients.

use barometer_traits::BarometerError;
use thiserror::Error;

/// Errors that can occur when fetching series from a provider.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned an error.
    #[error("API error: {0}")]
    Api(String),

    /// Response did not have the expected shape.
    #[error("Unexpected response format: {0}")]
    InvalidResponse(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl SourceError {
    /// Converts into the pipeline error taxonomy, naming the series involved.
    pub fn for_series(self, series: &str) -> BarometerError {
        BarometerError::DataFetch(format!("{series}: {self}"))
    }
}

impl From<SourceError> for BarometerError {
    fn from(err: SourceError) -> Self {
        Self::DataFetch(err.to_string())
    }
}
