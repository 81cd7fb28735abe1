//! Error types for the barometer pipeline.
//!
//! The variants follow the run-level taxonomy: configuration problems are
//! caught before any fetch, fetch problems and missing critical series abort
//! the run, and insufficient history is reported separately so callers can
//! tell "not enough data yet" apart from a broken provider.

use thiserror::Error;

/// The main error type for barometer operations.
#[derive(Debug, Error)]
pub enum BarometerError {
    /// Invalid or missing configuration (credential, window sizes, paths).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error fetching data from an external provider.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// A critical input series was absent from the fetch result.
    #[error("Missing critical series: {0}")]
    MissingSeries(String),

    /// Rolling windows are not yet satisfied for the requested output.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from a frame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl BarometerError {
    /// Process exit code for this error.
    ///
    /// Every fatal condition maps to a non-zero code; the categories are kept
    /// distinct so a scheduler can tell a provider outage from a warm-up gap.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::DataFetch(_) | Self::MissingSeries(_) => 3,
            Self::InsufficientData(_) => 4,
            _ => 1,
        }
    }
}

impl From<String> for BarometerError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for BarometerError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for barometer operations.
pub type Result<T> = std::result::Result<T, BarometerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BarometerError::MissingSeries("^VIX".to_string());
        assert_eq!(err.to_string(), "Missing critical series: ^VIX");

        let err = BarometerError::InsufficientData("no complete row".to_string());
        assert_eq!(err.to_string(), "Insufficient data: no complete row");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        assert_eq!(BarometerError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(BarometerError::DataFetch("x".into()).exit_code(), 3);
        assert_eq!(BarometerError::MissingSeries("x".into()).exit_code(), 3);
        assert_eq!(BarometerError::InsufficientData("x".into()).exit_code(), 4);
        assert_eq!(BarometerError::Other("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_from_string() {
        let err: BarometerError = "fail".into();
        assert!(matches!(err, BarometerError::Other(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BarometerError = io.into();
        assert!(matches!(err, BarometerError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
