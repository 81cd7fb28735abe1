//! Yahoo Finance chart API client.
//!
//! Fetches daily closes from the v8 chart endpoint. Adjusted closes are used
//! when the response carries them.

use reqwest::{Client, header::USER_AGENT};
use tracing::debug;

use crate::{
    Result,
    error::SourceError,
    fred::REQUEST_TIMEOUT,
    types::ChartResponse,
};
use barometer_traits::{Date, Observation, RawSeries};

/// Base URL for the chart API.
const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Yahoo rejects requests without a browser-like agent.
const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance chart client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a new client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: YAHOO_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the chart URL for a symbol and date range.
    fn chart_url(&self, symbol: &str, start: Date, end: Date) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive
        let end_ts = end
            .succ_opt()
            .unwrap_or(end)
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp();
        format!(
            "{}/{}?period1={start_ts}&period2={end_ts}&interval=1d&includeAdjustedClose=true",
            self.base_url,
            symbol.replace('^', "%5E")
        )
    }

    /// Fetch daily closes for a symbol.
    ///
    /// Returns `Ok(None)` when Yahoo has no data for the symbol.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-success HTTP statuses
    /// other than 404, and unparseable responses.
    pub async fn daily_closes(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> Result<Option<RawSeries>> {
        let url = self.chart_url(symbol, start, end);
        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, BROWSER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SourceError::Api(format!("HTTP {status}: {text}")));
        }

        let chart: ChartResponse = serde_json::from_str(&text)?;
        let series = parse_chart(symbol, chart)?;
        debug!(
            symbol,
            observations = series.as_ref().map_or(0, RawSeries::len),
            "fetched Yahoo closes"
        );
        Ok(series)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a chart response into closes. `None` means the symbol is unknown
/// or has no bars in range.
pub(crate) fn parse_chart(symbol: &str, chart: ChartResponse) -> Result<Option<RawSeries>> {
    let Some(data) = chart.chart.result.and_then(|r| r.into_iter().next()) else {
        return match chart.chart.error {
            Some(err) if err.code == "Not Found" => Ok(None),
            Some(err) => Err(SourceError::Api(format!("{}: {}", err.code, err.description))),
            None => Ok(None),
        };
    };

    let Some(timestamps) = data.timestamp else {
        return Ok(None);
    };

    let adjusted = data
        .indicators
        .adjclose
        .and_then(|v| v.into_iter().next())
        .map(|a| a.adjclose);
    let raw = data.indicators.quote.into_iter().next().map(|q| q.close);
    let closes = adjusted.or(raw).ok_or_else(|| {
        SourceError::InvalidResponse(format!("{symbol}: no close prices in chart"))
    })?;

    let mut observations = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| SourceError::InvalidResponse(format!("invalid timestamp: {ts}")))?;
        observations.push(match closes.get(i).copied().flatten() {
            Some(close) => Observation::new(date, close),
            None => Observation::missing(date),
        });
    }

    let series = RawSeries::new(symbol, observations);
    Ok(series.has_values().then_some(series))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_chart_url() {
        let client = YahooClient::new();
        let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
        assert_eq!(
            client.chart_url("^VIX", d(2), d(3)),
            "https://query2.finance.yahoo.com/v8/finance/chart/%5EVIX\
             ?period1=1704153600&period2=1704326400&interval=1d&includeAdjustedClose=true"
        );
    }

    #[test]
    fn test_parse_prefers_adjusted_close() {
        let response = chart(
            r#"{"chart": {"result": [{
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{"close": [472.6, 468.8, null]}],
                    "adjclose": [{"adjclose": [470.1, 466.3, null]}]
                }
            }], "error": null}}"#,
        );

        let series = parse_chart("SPY", response).unwrap().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.observations()[0].value, Some(470.1));
        assert_eq!(series.observations()[2].value, None);
        assert_eq!(
            series.first_date(),
            Some(Date::from_ymd_opt(2024, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_parse_raw_close_without_adjusted() {
        let response = chart(
            r#"{"chart": {"result": [{
                "timestamp": [1704205800],
                "indicators": {"quote": [{"close": [13.2]}]}
            }], "error": null}}"#,
        );
        let series = parse_chart("^VIX", response).unwrap().unwrap();
        assert_eq!(series.last_value(), Some(13.2));
    }

    #[test]
    fn test_not_found_is_omission() {
        let response = chart(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#,
        );
        assert!(parse_chart("^CPCE", response).unwrap().is_none());
    }

    #[test]
    fn test_other_errors_propagate() {
        let response = chart(
            r#"{"chart": {"result": null, "error": {"code": "Bad Request", "description": "Invalid input"}}}"#,
        );
        assert!(matches!(
            parse_chart("SPY", response),
            Err(SourceError::Api(_))
        ));
    }

    #[test]
    fn test_no_timestamps_is_omission() {
        let response = chart(
            r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#,
        );
        assert!(parse_chart("SPHB", response).unwrap().is_none());
    }
}
