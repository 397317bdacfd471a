use crate::commands::{load_config, reference_instant};
use crate::reporters::{JsonReporter, MarkdownReporter, OutcomeKind, RecordOutcome};
use crate::store::RecordStore;
use crate::ReportFormat;
use anyhow::Result;
use chrono::NaiveDate;
use ck_core::migration::{get_migration_summary, Migrator};
use ck_core::models::{ContractRecord, MigrationSummary};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

/// Options of a migration run
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Overrides `[output] format`
    pub format: Option<ReportFormat>,
    /// Report only; never touch record files
    pub dry_run: bool,
    /// Reference date instead of today
    pub as_of: Option<NaiveDate>,
}

/// Result of a migration run
#[derive(Debug)]
pub struct MigrateReport {
    pub summary: MigrationSummary,
    pub outcomes: Vec<RecordOutcome>,
    pub report_path: String,
}

/// Migrates every stored record and writes a report
pub fn execute_migrate(config_path: &str, options: &MigrateOptions) -> Result<MigrateReport> {
    let config = load_config(config_path)?;
    let format = match options.format {
        Some(format) => format,
        None => config.report_format()?,
    };
    let write_back = config.migration.write_back && !options.dry_run;
    let now = reference_instant(options.as_of);

    let store = RecordStore::new(&config.data_dir);
    let loaded = store.load_all()?;

    let pb = ProgressBar::new(loaded.records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Migrating records...");

    let migrator = Migrator::new();
    let mut results = Vec::new();
    let mut outcomes = Vec::new();

    for (path, reason) in &loaded.unreadable {
        outcomes.push(RecordOutcome {
            file: path.to_string_lossy().to_string(),
            id: None,
            kind: OutcomeKind::Failed,
            notes: Vec::new(),
            error: Some(format!("Invalid JSON: {}", reason)),
            written: false,
        });
    }

    for record in &loaded.records {
        let file = record.path.to_string_lossy().to_string();
        let id = record.value.get("id").and_then(|v| v.as_str()).map(str::to_string);

        let migrated = ContractRecord::from_value(record.value.clone()).and_then(|parsed| {
            let canonical = matches!(parsed, ContractRecord::Canonical(_));
            migrator.migrate(parsed, now).map(|result| (canonical, result))
        });

        match migrated {
            Ok((canonical, result)) => {
                let changed = !canonical;
                let kind = if result.was_migrated {
                    OutcomeKind::Migrated
                } else if changed {
                    OutcomeKind::Normalized
                } else {
                    OutcomeKind::Unchanged
                };

                let written = write_back && changed;
                if written {
                    if let Err(err) =
                        store.write(&record.path, &result.contract, config.migration.backup)
                    {
                        let message = format!("{:#}", err);
                        error!(path = %file, error = %message, "Failed to write record");
                        outcomes.push(RecordOutcome {
                            file,
                            id: Some(result.contract.id),
                            kind: OutcomeKind::Failed,
                            notes: result.migration_notes,
                            error: Some(message),
                            written: false,
                        });
                        pb.inc(1);
                        continue;
                    }
                    info!(path = %file, kind = ?kind, "Rewrote record");
                }

                outcomes.push(RecordOutcome {
                    file,
                    id: Some(result.contract.id.clone()),
                    kind,
                    notes: result.migration_notes.clone(),
                    error: None,
                    written,
                });
                results.push(result);
            }
            Err(err) => {
                error!(path = %file, error = %err, "Failed to migrate record");
                outcomes.push(RecordOutcome {
                    file,
                    id,
                    kind: OutcomeKind::Failed,
                    notes: Vec::new(),
                    error: Some(err.to_string()),
                    written: false,
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Records migrated");

    let summary = get_migration_summary(&results);

    match format {
        ReportFormat::Json => {
            JsonReporter.generate(&outcomes, &summary, &config.output.path)?;
        }
        ReportFormat::Markdown => {
            MarkdownReporter.generate(&outcomes, &summary, &config.output.path)?;
        }
    }

    let failed = RecordOutcome::count(&outcomes, OutcomeKind::Failed);
    println!(
        "{} {} migrated, {} unchanged, {}",
        "Migration completed:".bold(),
        summary.migrated.to_string().green(),
        summary.unchanged,
        if failed > 0 {
            format!("{} failed", failed).red().to_string()
        } else {
            "0 failed".to_string()
        }
    );
    if options.dry_run {
        println!("{}", "Dry run: no records were written".yellow());
    }
    println!("Report saved to {}", config.output.path);

    Ok(MigrateReport {
        summary,
        outcomes,
        report_path: config.output.path,
    })
}
