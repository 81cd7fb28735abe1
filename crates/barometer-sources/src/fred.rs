//! FRED (Federal Reserve Economic Data) API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::{
    Result,
    error::SourceError,
    types::{FredError, FredObservations},
};
use barometer_traits::{Date, Observation, RawSeries};

/// Base URL for the FRED API.
const FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Missing-value marker in FRED observations.
const MISSING_MARKER: &str = ".";

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// FRED API client.
#[derive(Debug, Clone)]
pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    /// Create a new FRED client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: FRED_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (proxies, recorded fixtures).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the observations URL for a series and date range.
    fn observations_url(&self, series_id: &str, start: Date, end: Date) -> String {
        format!(
            "{}/series/observations?series_id={series_id}&api_key={}&file_type=json\
             &observation_start={start}&observation_end={end}",
            self.base_url, self.api_key
        )
    }

    /// Fetch observations of a series between `start` and `end` (inclusive).
    ///
    /// `"."` values become missing observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, FRED reports an error, or the
    /// series has no observation in the range.
    pub async fn observations(&self, series_id: &str, start: Date, end: Date) -> Result<RawSeries> {
        let url = self.observations_url(series_id, start, end);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<FredError>(&text)
                .map_or_else(|_| text.clone(), |e| e.error_message);
            return Err(SourceError::Api(format!("HTTP {status}: {message}")));
        }

        let series = parse_observations(series_id, &text)?;
        debug!(series = series_id, observations = series.len(), "fetched FRED series");
        Ok(series)
    }
}

/// Parse a `series/observations` JSON body.
pub(crate) fn parse_observations(series_id: &str, body: &str) -> Result<RawSeries> {
    let response: FredObservations = serde_json::from_str(body)?;

    let observations = response
        .observations
        .into_iter()
        .map(|obs| {
            let date = Date::parse_from_str(&obs.date, "%Y-%m-%d").map_err(|e| {
                SourceError::InvalidResponse(format!("bad date '{}': {e}", obs.date))
            })?;
            let value = obs.value.trim();
            if value == MISSING_MARKER {
                return Ok(Observation::missing(date));
            }
            let value = value.parse::<f64>().map_err(|e| {
                SourceError::InvalidResponse(format!("bad value '{value}' on {date}: {e}"))
            })?;
            Ok(Observation::new(date, value))
        })
        .collect::<Result<Vec<_>>>()?;

    if observations.is_empty() {
        return Err(SourceError::NoData(series_id.to_string()));
    }

    Ok(RawSeries::new(series_id, observations))
}
