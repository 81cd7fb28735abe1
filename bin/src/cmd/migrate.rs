//! Migrate command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use barometer::HistoryStore;
use barometer::store::LoadState;

/// Rewrite the artifact as sorted positional records.
pub(crate) fn migrate_artifact(path: &Path) -> Result<()> {
    let store = HistoryStore::load(path)?;

    match store.load_state() {
        LoadState::Missing => {
            println!("No artifact at {}; nothing to migrate.", path.display());
            return Ok(());
        }
        LoadState::Recovered { backup } => {
            let backup = backup
                .as_ref()
                .map_or_else(|| "none".to_string(), |b| b.display().to_string());
            bail!(
                "{} is malformed and was not rewritten (backup: {backup})",
                path.display()
            );
        }
        LoadState::Loaded { migrated } => {
            store.persist()?;
            if *migrated > 0 {
                println!(
                    "Migrated {migrated} of {} records in {}",
                    store.len(),
                    path.display()
                );
            } else {
                println!("Normalized {} records in {}", store.len(), path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_migrate_legacy_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market_indices.json");
        fs::write(
            &path,
            r#"[
    {"date": "2024-06-04", "macro": 0.55, "liquidity": NaN},
    ["2024-06-03", 0.52]
]"#,
        )
        .unwrap();

        migrate_artifact(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("[\"2024-06-03\",0.52,null,"));
        assert!(lines[2].starts_with("[\"2024-06-04\",0.55,null,null,"));

        let store = HistoryStore::load(&path).unwrap();
        assert_eq!(store.load_state(), &LoadState::Loaded { migrated: 0 });
    }

    #[test]
    fn test_migrate_refuses_malformed_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market_indices.json");
        fs::write(&path, "not valid json").unwrap();

        let err = migrate_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("malformed"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not valid json");
    }

    #[test]
    fn test_migrate_missing_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("market_indices.json");

        migrate_artifact(&path).unwrap();
        assert!(!path.exists());
    }
}
