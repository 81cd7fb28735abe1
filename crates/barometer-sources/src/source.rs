//! Provider abstractions consumed by the pipeline.

use std::collections::BTreeMap;
use std::future::Future;

use tracing::warn;

use crate::{FredClient, Result, YahooClient};
use barometer_traits::{Date, RawSeries, SeriesId};

/// Daily closes per ticker.
///
/// Implementations may omit tickers they have no data for; the returned map
/// then simply lacks those keys.
pub trait MarketDataSource: Send + Sync {
    /// Fetch daily closes for `symbols` between `start` and `end` (inclusive).
    fn fetch_closes(
        &self,
        symbols: &[&str],
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<BTreeMap<SeriesId, RawSeries>>> + Send;
}

/// Timestamped macro series by id.
///
/// Any retrieval failure is returned as an error.
pub trait MacroDataSource: Send + Sync {
    /// Fetch one series between `start` and `end` (inclusive).
    fn fetch_series(
        &self,
        series_id: &str,
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<RawSeries>> + Send;
}

impl MarketDataSource for YahooClient {
    async fn fetch_closes(
        &self,
        symbols: &[&str],
        start: Date,
        end: Date,
    ) -> Result<BTreeMap<SeriesId, RawSeries>> {
        let mut closes = BTreeMap::new();
        for &symbol in symbols {
            match self.daily_closes(symbol, start, end).await? {
                Some(series) => {
                    closes.insert(symbol.to_string(), series);
                }
                None => warn!(symbol, "market data source has no data for symbol; omitted"),
            }
        }
        Ok(closes)
    }
}

impl MacroDataSource for FredClient {
    async fn fetch_series(&self, series_id: &str, start: Date, end: Date) -> Result<RawSeries> {
        self.observations(series_id, start, end).await
    }
}
