use crate::reporters::{OutcomeKind, RecordOutcome};
use anyhow::Result;
use ck_core::models::MigrationSummary;
use std::fs;
use std::path::Path;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generates report in .contract_migration_report.md format
    pub fn generate(
        &self,
        outcomes: &[RecordOutcome],
        summary: &MigrationSummary,
        output_path: &str,
    ) -> Result<()> {
        let mut report = String::new();

        report.push_str("# Contract Migration Report\n\n");
        report.push_str(&format!(
            "## Migration Date\n{}\n\n",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));

        let normalized = RecordOutcome::count(outcomes, OutcomeKind::Normalized);
        let failed = RecordOutcome::count(outcomes, OutcomeKind::Failed);
        let written = outcomes.iter().filter(|o| o.written).count();

        report.push_str("## Migration Statistics\n\n");
        report.push_str(&format!("- **Total Records**: {}\n", outcomes.len()));
        report.push_str(&format!("- **Migrated**: {}\n", summary.migrated));
        report.push_str(&format!("- **Unchanged**: {}\n", summary.unchanged));
        report.push_str(&format!("  - Normalized Values: {}\n", normalized));
        report.push_str(&format!("- **Failed**: {}\n", failed));
        report.push_str(&format!("- **Written Back**: {}\n\n", written));

        report.push_str("---\n\n");

        let changed: Vec<&RecordOutcome> = outcomes
            .iter()
            .filter(|o| o.kind != OutcomeKind::Unchanged)
            .collect();
        if changed.is_empty() {
            report.push_str("All records already match the current schema.\n");
        }

        for (idx, outcome) in changed.iter().enumerate() {
            report.push_str(&format!(
                "### Record {}: `{}`\n\n",
                idx + 1,
                outcome.id.as_deref().unwrap_or("(no id)")
            ));
            report.push_str(&format!("**File:** `{}`\n\n", outcome.file));
            report.push_str(&format!(
                "**Status:** {}\n\n",
                Self::format_kind(outcome.kind)
            ));

            if let Some(error) = &outcome.error {
                report.push_str(&format!("**Error:** {}\n\n", error));
            }
            if !outcome.notes.is_empty() {
                report.push_str("**Changes:**\n\n");
                for note in &outcome.notes {
                    report.push_str(&format!("- {}\n", note));
                }
                report.push('\n');
            }
            report.push_str("---\n\n");
        }

        fs::write(Path::new(output_path), report)?;
        Ok(())
    }

    fn format_kind(kind: OutcomeKind) -> &'static str {
        match kind {
            OutcomeKind::Migrated => "✅ **MIGRATED** - legacy shape upgraded",
            OutcomeKind::Normalized => "🔧 **NORMALIZED** - values coerced to the current schema",
            OutcomeKind::Unchanged => "✅ **UNCHANGED**",
            OutcomeKind::Failed => "❌ **FAILED** - record left untouched",
        }
    }
}
