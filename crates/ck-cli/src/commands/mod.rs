pub mod costs;
pub mod init;
pub mod migrate;
pub mod schedule;

use crate::config::Config;
use crate::store::RecordStore;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ck_core::migration::Migrator;
use ck_core::models::Contract;
use std::path::Path;
use tracing::warn;

/// Reference instant for a command: midnight UTC of `as_of`, or the system
/// clock when no date is given
pub fn reference_instant(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    match as_of {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    }
}

/// Loads the configuration the way every command does: relative paths
/// resolve against the config file's directory
pub fn load_config(config_path: &str) -> Result<Config> {
    let base_path = Path::new(config_path).parent();
    Config::load(config_path, base_path)
}

/// Loads every record and brings it into the current schema in memory.
/// Records that cannot be migrated are logged and skipped.
pub fn load_contracts(config: &Config, now: DateTime<Utc>) -> Result<Vec<Contract>> {
    let store = RecordStore::new(&config.data_dir);
    let loaded = store.load_all()?;
    let migrator = Migrator::new();

    let mut contracts = Vec::with_capacity(loaded.records.len());
    for record in &loaded.records {
        match migrator.migrate_value(&record.value, now) {
            Ok(result) => contracts.push(result.contract),
            Err(err) => warn!(
                path = ?record.path,
                error = %err,
                "Skipping record that cannot be migrated"
            ),
        }
    }
    Ok(contracts)
}
