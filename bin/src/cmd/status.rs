//! Status command implementation.

use std::path::Path;

use anyhow::Result;
use barometer::HistoryStore;
use barometer::store::LoadState;

use super::print_record;

/// Print a summary of the history artifact and its most recent records.
///
/// Read-only: a malformed artifact is reported but not backed up.
pub(crate) fn show_status(path: &Path, last: usize) -> Result<()> {
    let store = HistoryStore::inspect(path)?;

    println!("Artifact: {}", path.display());
    match store.load_state() {
        LoadState::Missing => {
            println!("No history yet.");
            return Ok(());
        }
        LoadState::Loaded { migrated: 0 } => {}
        LoadState::Loaded { migrated } => {
            println!("Format:   {migrated} legacy records (run `barometer migrate` to upgrade)");
        }
        LoadState::Recovered { backup } => {
            println!("Format:   malformed, treated as empty");
            if let Some(backup) = backup {
                println!("Backup:   {}", backup.display());
            }
        }
    }

    let records = store.records();
    println!("Records:  {}", records.len());
    if let (Some(first), Some(latest)) = (records.first(), records.last()) {
        println!("Range:    {} to {}", first.date(), latest.date());
    }
    println!();

    for record in records.iter().rev().take(last).rev() {
        print_record(record);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_status_of_malformed_artifact_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market_indices.json");
        fs::write(&path, "[[\"2024-06-03\", 0.5").unwrap();

        show_status(&path, 1).unwrap();

        assert!(!dir.path().join("market_indices.json.bak").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_status_of_legacy_and_missing_artifacts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market_indices.json");
        show_status(&path, 1).unwrap();
        assert!(!path.exists());

        let legacy = r#"[{"date": "2024-06-03", "macro": 0.52, "sentiment": 61.2}]"#;
        fs::write(&path, legacy).unwrap();
        show_status(&path, 5).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), legacy);
    }
}
