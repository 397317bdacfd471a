use anyhow::{Context, Result};
use ck_core::models::Contract;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A raw record and the file it was read from
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub path: PathBuf,
    pub value: Value,
}

/// Result of scanning the data directory
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub records: Vec<StoredRecord>,
    /// Files that exist but are not valid JSON
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Per-record JSON files in a single directory
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads every `*.json` file, sorted by file name
    pub fn load_all(&self) -> Result<LoadOutcome> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read data directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut outcome = LoadOutcome::default();
        for path in paths {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read record: {}", path.display()))?;
            match serde_json::from_str::<Value>(&content) {
                Ok(value) => outcome.records.push(StoredRecord { path, value }),
                Err(err) => {
                    tracing::warn!(path = ?path, error = %err, "Skipping unreadable record");
                    outcome.unreadable.push((path, err.to_string()));
                }
            }
        }

        tracing::debug!(
            dir = ?self.dir,
            records = outcome.records.len(),
            unreadable = outcome.unreadable.len(),
            "Loaded records"
        );
        Ok(outcome)
    }

    /// Overwrites `path` with `contract`, optionally keeping the previous
    /// content as `<path>.bak`
    pub fn write(&self, path: &Path, contract: &Contract, backup: bool) -> Result<()> {
        if backup && path.exists() {
            let backup_path = backup_path(path);
            fs::copy(path, &backup_path)
                .with_context(|| format!("Failed to back up record: {}", path.display()))?;
        }
        let json = serde_json::to_string_pretty(contract)?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write record: {}", path.display()))?;
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}
