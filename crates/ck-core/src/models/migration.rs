use crate::models::Contract;
use serde::{Deserialize, Serialize};

/// Outcome of migrating a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    /// Record in the current schema
    pub contract: Contract,
    /// True when a payment-info, legacy-status or missing-contactInfo
    /// migration was applied
    pub was_migrated: bool,
    /// One human-readable note per kind of transformation applied
    pub migration_notes: Vec<String>,
}

/// Aggregate view over a batch of migration results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub total: usize,
    pub migrated: usize,
    pub unchanged: usize,
    /// Notes of every migrated result, in input order
    pub migration_notes: Vec<String>,
}
