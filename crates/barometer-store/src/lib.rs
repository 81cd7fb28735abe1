#![doc(issue_tracker_base_url = "https://github.com/factordynamics/barometer/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Persisted history of barometer snapshots.
//!
//! One JSON artifact holds every daily [`HistoryRecord`], ascending by date
//! with exactly one record per date. [`HistoryStore`] loads it (tolerating a
//! missing or malformed file and migrating legacy encodings), merges the
//! run's new record and writes it back atomically.
//!
//! # Example
//!
//! ```no_run
//! use barometer_store::{HistoryRecord, HistoryStore};
//! use barometer_traits::Date;
//!
//! let mut store = HistoryStore::load("data/market_indices.json")?;
//! let date = Date::from_ymd_opt(2024, 6, 3).unwrap();
//! store.merge(HistoryRecord::from_lookup(date, |_| Some(0.0)));
//! store.persist()?;
//! # Ok::<(), barometer_traits::BarometerError>(())
//! ```

pub mod record;
pub mod store;

pub use record::{FIELD_COUNT, FIELD_NAMES, HistoryRecord, StoredRecord};
pub use store::{HistoryStore, LoadState, MergeOutcome};
