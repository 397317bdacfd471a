use crate::reporters::{OutcomeKind, RecordOutcome};
use anyhow::Result;
use ck_core::models::MigrationSummary;
use std::fs;
use std::path::Path;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generates a JSON migration report
    pub fn generate(
        &self,
        outcomes: &[RecordOutcome],
        summary: &MigrationSummary,
        output_path: &str,
    ) -> Result<()> {
        let report = serde_json::json!({
            "version": "1.0.0",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "summary": Self::build_summary(outcomes, summary),
            "records": outcomes,
        });

        let json_string = serde_json::to_string_pretty(&report)?;
        fs::write(Path::new(output_path), json_string)?;
        Ok(())
    }

    fn build_summary(outcomes: &[RecordOutcome], summary: &MigrationSummary) -> serde_json::Value {
        serde_json::json!({
            "total": outcomes.len(),
            "migrated": summary.migrated,
            "unchanged": summary.unchanged,
            "normalized": RecordOutcome::count(outcomes, OutcomeKind::Normalized),
            "failed": RecordOutcome::count(outcomes, OutcomeKind::Failed),
            "written": outcomes.iter().filter(|o| o.written).count(),
            "migrationNotes": summary.migration_notes,
        })
    }
}
