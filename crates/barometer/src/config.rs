//! Pipeline configuration.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use barometer_signals::NormalizerSet;
use barometer_traits::{BarometerError, Date, Result};

/// Default location of the history artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "data/market_indices.json";

/// Environment variable holding the macro data source credential.
pub const CREDENTIAL_ENV: &str = "FRED_API_KEY";

/// Settings for one pipeline run.
///
/// Built explicitly by the caller (the CLI fills it from flags and the
/// environment) and passed to [`crate::Pipeline`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Macro data source API key
    #[serde(skip_serializing)]
    pub credential: Option<String>,

    /// History artifact path (default: `data/market_indices.json`)
    pub artifact_path: PathBuf,

    /// Rolling Z-score window in trading days (default: 252)
    pub z_score_window: usize,

    /// Rolling Min-Max window for sentiment scores in trading days (default: 252)
    pub sentiment_window: usize,

    /// Defined samples required before a sentiment score is reported (default: 20)
    pub sentiment_min_periods: usize,

    /// Calendar days of history fetched per run (default: 1095)
    pub lookback_days: u32,

    /// Last date to fetch; today when unset
    pub as_of: Option<Date>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            credential: None,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            z_score_window: 252,
            sentiment_window: 252,
            sentiment_min_periods: 20,
            lookback_days: 1095,
            as_of: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("artifact_path", &self.artifact_path)
            .field("z_score_window", &self.z_score_window)
            .field("sentiment_window", &self.sentiment_window)
            .field("sentiment_min_periods", &self.sentiment_min_periods)
            .field("lookback_days", &self.lookback_days)
            .field("as_of", &self.as_of)
            .finish()
    }
}

impl PipelineConfig {
    /// Checks the configuration before anything is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::Configuration`] for a missing credential, a
    /// zero window or lookback, or `sentiment_min_periods` larger than
    /// `sentiment_window`.
    pub fn validate(&self) -> Result<()> {
        if self
            .credential
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err(BarometerError::Configuration(format!(
                "{CREDENTIAL_ENV} is missing"
            )));
        }
        self.validate_windows()
    }

    /// Checks the window parameters only.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn validate_windows(&self) -> Result<()> {
        for (name, value) in [
            ("z_score_window", self.z_score_window),
            ("sentiment_window", self.sentiment_window),
            ("sentiment_min_periods", self.sentiment_min_periods),
        ] {
            if value == 0 {
                return Err(BarometerError::Configuration(format!(
                    "{name} must be positive"
                )));
            }
        }
        if self.sentiment_min_periods > self.sentiment_window {
            return Err(BarometerError::Configuration(format!(
                "sentiment_min_periods ({}) exceeds sentiment_window ({})",
                self.sentiment_min_periods, self.sentiment_window
            )));
        }
        if self.lookback_days == 0 {
            return Err(BarometerError::Configuration(
                "lookback_days must be positive".to_string(),
            ));
        }

        // roughly 252 trading days per 365 calendar days
        let trading_days = self.lookback_days as usize * 252 / 365;
        let longest = self.z_score_window.max(self.sentiment_window);
        if trading_days <= longest {
            warn!(
                lookback_days = self.lookback_days,
                longest_window = longest,
                "lookback is unlikely to cover the longest window"
            );
        }
        Ok(())
    }

    /// Normalizer windows for this run.
    pub const fn normalizers(&self) -> NormalizerSet {
        NormalizerSet::new(
            self.z_score_window,
            self.sentiment_window,
            self.sentiment_min_periods,
        )
    }

    /// Inclusive fetch range ending at `as_of` (or `today`).
    pub fn date_range(&self, today: Date) -> (Date, Date) {
        let end = self.as_of.unwrap_or(today);
        let start = end - chrono::Days::new(u64::from(self.lookback_days));
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> PipelineConfig {
        PipelineConfig {
            credential: Some("key".to_string()),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.artifact_path, PathBuf::from("data/market_indices.json"));
        assert_eq!(config.z_score_window, 252);
        assert_eq!(config.sentiment_window, 252);
        assert_eq!(config.sentiment_min_periods, 20);
        assert_eq!(config.lookback_days, 1095);
        assert!(config.as_of.is_none());
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_missing_credential() {
        let err = PipelineConfig::default().validate().unwrap_err();
        assert!(matches!(err, BarometerError::Configuration(_)));
        assert_eq!(err.exit_code(), 2);

        let blank = PipelineConfig {
            credential: Some("  ".to_string()),
            ..PipelineConfig::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_zero_windows_rejected() {
        for config in [
            PipelineConfig {
                z_score_window: 0,
                ..configured()
            },
            PipelineConfig {
                sentiment_window: 0,
                ..configured()
            },
            PipelineConfig {
                sentiment_min_periods: 0,
                ..configured()
            },
            PipelineConfig {
                lookback_days: 0,
                ..configured()
            },
            PipelineConfig {
                sentiment_window: 10,
                sentiment_min_periods: 11,
                ..configured()
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(BarometerError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_date_range() {
        let today = Date::from_ymd_opt(2024, 6, 30).unwrap();
        let config = PipelineConfig {
            lookback_days: 30,
            ..configured()
        };
        assert_eq!(
            config.date_range(today),
            (Date::from_ymd_opt(2024, 5, 31).unwrap(), today)
        );

        let as_of = Date::from_ymd_opt(2024, 1, 31).unwrap();
        let pinned = PipelineConfig {
            as_of: Some(as_of),
            ..config
        };
        assert_eq!(pinned.date_range(today).1, as_of);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let printed = format!("{:?}", configured());
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("\"key\""));
    }

    #[test]
    fn test_serde_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"z_score_window": 60, "as_of": "2024-06-03"}"#).unwrap();
        assert_eq!(config.z_score_window, 60);
        assert_eq!(config.sentiment_window, 252);
        assert_eq!(config.as_of, Date::from_ymd_opt(2024, 6, 3));
        assert!(!serde_json::to_string(&configured()).unwrap().contains("credential"));
    }
}
