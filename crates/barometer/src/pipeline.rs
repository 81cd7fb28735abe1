//! The daily update: fetch, align, score, compose and store.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use barometer_combine::{IndexComposer, ScoreFrame, Snapshot};
use barometer_signals::{
    AuxiliarySeries, PRIMARY_SERIES, SeriesAligner, SourceKind,
    components::{all_components, score_components},
    registry::{available_series, series_by_source},
};
use barometer_sources::{
    FredClient, MacroDataSource, MarketDataSource, SourceError, YahooClient,
};
use barometer_store::{HistoryRecord, HistoryStore, MergeOutcome};
use barometer_traits::{BarometerError, Date, RawSeries, Result, SeriesId};

use crate::config::PipelineConfig;

/// Everything fetched for one run, keyed by series id.
#[derive(Debug, Clone, Default)]
pub struct FetchedSeries {
    series: BTreeMap<SeriesId, RawSeries>,
}

impl FetchedSeries {
    /// Creates a fetch result from series keyed by id.
    pub const fn new(series: BTreeMap<SeriesId, RawSeries>) -> Self {
        Self { series }
    }

    /// Returns a series by id.
    pub fn get(&self, id: &str) -> Option<&RawSeries> {
        self.series.get(id)
    }

    /// Returns the number of fetched series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns whether nothing was fetched.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Adds or replaces a series.
    pub fn insert(&mut self, series: RawSeries) {
        self.series.insert(series.name().to_string(), series);
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The record merged into history
    pub record: HistoryRecord,

    /// Whether the record was new or replaced one for the same date
    pub outcome: MergeOutcome,

    /// History length after the merge
    pub history_len: usize,

    /// Components dropped because a non-critical input was absent
    pub dropped: BTreeSet<String>,
}

/// The index pipeline over a market and a macro data source.
#[derive(Debug)]
pub struct Pipeline<M, F> {
    config: PipelineConfig,
    market: M,
    macro_source: F,
    aligner: SeriesAligner,
    composer: IndexComposer,
}

impl Pipeline<YahooClient, FredClient> {
    /// Builds the pipeline against the live Yahoo and FRED clients.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::Configuration`] if the configuration is
    /// invalid.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let credential = config.credential.clone().unwrap_or_default();
        Self::new(config, YahooClient::new(), FredClient::new(credential))
    }
}

impl<M: MarketDataSource, F: MacroDataSource> Pipeline<M, F> {
    /// Creates a pipeline over the given sources.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::Configuration`] if the configuration is
    /// invalid.
    pub fn new(config: PipelineConfig, market: M, macro_source: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            market,
            macro_source,
            aligner: SeriesAligner::new(),
            composer: IndexComposer::default(),
        })
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetches every registered series between `start` and `end`.
    ///
    /// Market symbols the source omits are left out of the result. A macro
    /// series that fails to download aborts the fetch, except that a
    /// non-critical series with no observations is left out.
    ///
    /// # Errors
    ///
    /// Returns [`BarometerError::DataFetch`] naming the failing series.
    pub async fn fetch(&self, start: Date, end: Date) -> Result<FetchedSeries> {
        let market_ids: Vec<&str> = series_by_source(SourceKind::Market)
            .iter()
            .map(|info| info.id)
            .collect();
        info!(symbols = market_ids.len(), %start, %end, "fetching market closes");
        let closes = self
            .market
            .fetch_closes(&market_ids, start, end)
            .await
            .map_err(BarometerError::from)?;

        let mut fetched = FetchedSeries::new(closes);
        for info in series_by_source(SourceKind::Macro) {
            match self.macro_source.fetch_series(info.id, start, end).await {
                Ok(series) => fetched.insert(series),
                Err(SourceError::NoData(_)) if !info.critical => {
                    warn!(series = info.id, "macro series has no observations; omitted");
                }
                Err(e) => return Err(e.for_series(info.id)),
            }
        }

        info!(series = fetched.len(), "fetch complete");
        Ok(fetched)
    }

    /// Aligns, normalizes and composes the fetched series.
    ///
    /// # Errors
    ///
    /// - [`BarometerError::MissingSeries`] if the primary or a critical series
    ///   is absent.
    /// - [`BarometerError::InsufficientData`] if every component of a
    ///   composite is absent.
    pub fn compute(&self, fetched: &FetchedSeries) -> Result<ScoreFrame> {
        let primary = fetched
            .get(PRIMARY_SERIES)
            .ok_or_else(|| BarometerError::MissingSeries(PRIMARY_SERIES.to_string()))?;

        let registry = available_series();
        let auxiliary: Vec<AuxiliarySeries<'_>> = registry
            .iter()
            .filter(|info| info.id != PRIMARY_SERIES)
            .map(|info| AuxiliarySeries {
                name: info.id,
                critical: info.critical,
                series: fetched.get(info.id),
            })
            .collect();

        let frame = self.aligner.align(primary, &auxiliary)?;
        info!(
            rows = frame.len(),
            absent = frame.absent().len(),
            "aligned series onto calendar"
        );

        let scores = score_components(&frame, &all_components(), &self.config.normalizers())?;
        self.composer.compose(frame.calendar().to_vec(), scores)
    }

    /// Fetches and computes the latest snapshot without touching history.
    ///
    /// # Errors
    ///
    /// Any fetch, alignment or composition error, or
    /// [`BarometerError::InsufficientData`] if no date has every index defined.
    pub async fn snapshot(&self, today: Date) -> Result<(Snapshot, BTreeSet<String>)> {
        let (start, end) = self.config.date_range(today);
        let fetched = self.fetch(start, end).await?;
        let frame = self.compute(&fetched)?;
        let snapshot = frame.latest()?;
        info!(date = %snapshot.date(), "extracted latest snapshot");
        Ok((snapshot, frame.dropped().clone()))
    }

    /// Runs the full update and merges the new record into history.
    ///
    /// The artifact is only written after every computation has succeeded.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::snapshot`], or an I/O error while reading or
    /// writing the artifact.
    pub async fn run(&self, today: Date) -> Result<RunReport> {
        let (snapshot, dropped) = self.snapshot(today).await?;
        let record = to_record(&snapshot);

        let mut store = HistoryStore::load(&self.config.artifact_path)?;
        let outcome = store.merge(record.clone());
        store.persist()?;

        info!(
            date = %record.date(),
            ?outcome,
            history = store.len(),
            "history updated"
        );
        Ok(RunReport {
            record,
            outcome,
            history_len: store.len(),
            dropped,
        })
    }
}

/// Builds the history record for a snapshot.
pub fn to_record(snapshot: &Snapshot) -> HistoryRecord {
    HistoryRecord::from_lookup(snapshot.date(), |field| snapshot.get(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use barometer_signals::IndexKind;
    use barometer_store::FIELD_NAMES;
    use std::collections::HashSet;

    #[test]
    fn test_record_fields_are_produced() {
        let mut produced: HashSet<&str> = IndexKind::ALL.iter().map(IndexKind::column).collect();
        produced.extend(all_components().iter().map(|c| c.name));

        for field in FIELD_NAMES {
            assert!(produced.contains(field), "{field} is never computed");
        }
    }

    #[test]
    fn test_fetched_series() {
        let mut fetched = FetchedSeries::default();
        assert!(fetched.is_empty());
        fetched.insert(RawSeries::empty("SPY"));
        assert_eq!(fetched.len(), 1);
        assert!(fetched.get("SPY").is_some());
    }
}
