//! The persisted history artifact.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use tracing::{debug, info, warn};

use barometer_traits::{Date, Result};

use crate::record::{HistoryRecord, StoredRecord};

/// How the in-memory history was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No artifact existed; history starts empty.
    Missing,
    /// The artifact parsed; `migrated` records were in an older encoding.
    Loaded {
        /// Records converted from a legacy encoding
        migrated: usize,
    },
    /// The artifact was malformed and has been set aside.
    Recovered {
        /// Where the malformed content was copied, if the copy succeeded
        backup: Option<PathBuf>,
    },
}

/// Whether a merge added a new date or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No record existed for the date.
    Appended,
    /// A record for the date was replaced.
    Replaced,
}

/// Ordered, date-unique history backed by one JSON file.
///
/// Records are kept ascending by date with at most one record per date.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
    state: LoadState,
}

impl HistoryStore {
    /// Creates an empty store bound to `path` without touching the disk.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            state: LoadState::Missing,
        }
    }

    /// Loads the artifact at `path`.
    ///
    /// A missing artifact yields an empty history. A malformed artifact is
    /// copied to `<artifact>.bak`, logged, and also yields an empty history.
    /// Records in older encodings are migrated, then the collection is sorted
    /// with one record per date (the last occurrence wins).
    ///
    /// # Errors
    ///
    /// Returns an I/O error only if an existing artifact cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        Self::load_with(path.into(), true)
    }

    /// Loads the artifact like [`Self::load`] but never writes to disk.
    ///
    /// A malformed artifact yields an empty history with no backup.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only if an existing artifact cannot be read.
    pub fn inspect(path: impl Into<PathBuf>) -> Result<Self> {
        Self::load_with(path.into(), false)
    }

    fn load_with(path: PathBuf, back_up: bool) -> Result<Self> {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no history artifact; starting empty");
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(e.into()),
        };

        match parse_records(&content) {
            Ok((records, migrated)) => {
                let records = normalize(records);
                if migrated > 0 {
                    info!(migrated, "migrated legacy history records");
                }
                debug!(path = %path.display(), records = records.len(), "loaded history");
                Ok(Self {
                    path,
                    records,
                    state: LoadState::Loaded { migrated },
                })
            }
            Err(e) => {
                let backup = if back_up {
                    let backup = backup_path(&path);
                    match fs::copy(&path, &backup) {
                        Ok(_) => Some(backup),
                        Err(copy_err) => {
                            warn!(error = %copy_err, "could not back up malformed artifact");
                            None
                        }
                    }
                } else {
                    None
                };
                warn!(
                    path = %path.display(),
                    error = %e,
                    backup = ?backup,
                    "history artifact is malformed; starting empty"
                );
                Ok(Self {
                    path,
                    records: Vec::new(),
                    state: LoadState::Recovered { backup },
                })
            }
        }
    }

    /// Returns the artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns how the history was loaded.
    pub const fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Returns all records, ascending by date.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the history is empty.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the most recent record.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Returns the record for a date.
    pub fn get(&self, date: Date) -> Option<&HistoryRecord> {
        self.records
            .binary_search_by_key(&date, HistoryRecord::date)
            .ok()
            .map(|i| &self.records[i])
    }

    /// Inserts `record`, replacing any record with the same date.
    pub fn merge(&mut self, record: HistoryRecord) -> MergeOutcome {
        let before = self.records.len();
        self.records.retain(|r| r.date() != record.date());
        let outcome = if self.records.len() < before {
            MergeOutcome::Replaced
        } else {
            MergeOutcome::Appended
        };

        debug!(date = %record.date(), ?outcome, "merging history record");
        self.records.push(record);
        self.records.sort_by_key(HistoryRecord::date);
        outcome
    }

    /// Writes the full history to the artifact.
    ///
    /// The content goes to a temporary file in the artifact's directory,
    /// which is flushed to disk and then renamed over the artifact. Parent
    /// directories are created if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails; the
    /// previous artifact is left in place in that case.
    pub fn persist(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let content = to_json(&self.records)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        info!(path = %self.path.display(), records = self.records.len(), "persisted history");
        Ok(())
    }
}

/// Parses an artifact, returning the records and how many were migrated.
fn parse_records(content: &str) -> Result<(Vec<HistoryRecord>, usize)> {
    let stored: Vec<StoredRecord> = serde_json::from_str(&null_non_finite(content))?;
    let migrated = stored.iter().filter(|r| r.needs_migration()).count();
    let records = stored
        .into_iter()
        .map(HistoryRecord::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok((records, migrated))
}

/// Rewrites bare `NaN`, `Infinity` and `-Infinity` tokens as `null`.
///
/// Older artifacts were written by encoders that emit these non-standard
/// literals for missing values. Text inside JSON strings is left alone.
fn null_non_finite(content: &str) -> Cow<'_, str> {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];
    if !content.contains("NaN") && !content.contains("Infinity") {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    let mut in_string = false;
    let mut escaped = false;
    while let Some(c) = rest.chars().next() {
        if !in_string {
            if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(*t)) {
                out.push_str("null");
                rest = &rest[token.len()..];
                continue;
            }
            in_string = c == '"';
        } else if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            in_string = false;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

/// Sorts ascending by date, keeping the last occurrence of each date.
pub fn normalize(records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    let mut by_date = BTreeMap::new();
    for record in records {
        by_date.insert(record.date(), record);
    }
    by_date.into_values().collect()
}

/// Serializes records as a JSON array with one compact record per line.
///
/// # Errors
///
/// Returns a JSON error if a record cannot be serialized.
pub fn to_json(records: &[HistoryRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok("[]\n".to_string());
    }

    let rows = records
        .iter()
        .map(serde_json::to_string)
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(format!("[\n{}\n]\n", rows.join(",\n")))
}

/// `<artifact>.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, "bak")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
