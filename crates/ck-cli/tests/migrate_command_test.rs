use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::{json, Value};

use ck_cli::commands::costs::execute_costs;
use ck_cli::commands::migrate::{execute_migrate, MigrateOptions};
use ck_cli::commands::schedule::{execute_schedule, ScheduleOptions};
use ck_cli::reporters::OutcomeKind;
use ck_cli::ReportFormat;

fn create_temp_project(records: &[(&str, &str)]) -> tempfile::TempDir {
    let tmp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let data_dir = tmp_dir.path().join("data");
    fs::create_dir_all(&data_dir).expect("failed to create data dir");
    for (name, content) in records {
        fs::write(data_dir.join(name), content).expect("failed to write record");
    }
    tmp_dir
}

fn write_config(dir: &Path, write_back: bool) -> String {
    let config = format!(
        r#"data_dir = "data"

[schedule]
lookahead = 3
due_soon_days = 7

[migration]
write_back = {write_back}
backup = true

[output]
format = "json"
path = "report.json"
"#
    );
    let path = dir.join("contract-keeper.toml");
    fs::write(&path, config).expect("failed to write config");
    path.to_string_lossy().to_string()
}

const LEGACY: &str = r#"{
  "id": "legacy-1",
  "name": "Streaming bundle",
  "status": "pending",
  "category": "subscriptions",
  "paymentInfo": {"nextPaymentDate": "2024-02-01"},
  "startDate": "2024-01-01",
  "frequency": "monthly",
  "amount": 150,
  "currency": "USD"
}"#;

const CANONICAL: &str = r#"{
  "id": "c-2",
  "name": "Home insurance",
  "startDate": "2023-06-10",
  "amount": 300.0,
  "currency": "USD",
  "frequency": "quarterly",
  "status": "active",
  "category": "insurance",
  "contactInfo": {"phone": "555-0101"},
  "tags": [],
  "attachments": [],
  "createdAt": "2023-06-01T00:00:00Z",
  "updatedAt": "2023-06-01T00:00:00Z"
}"#;

const SYNONYM_ONLY: &str = r#"{
  "id": "c-3",
  "name": "Power",
  "startDate": "2023-01-15",
  "amount": 80.0,
  "currency": "USD",
  "frequency": "monthly",
  "status": "active",
  "category": "Utility",
  "contactInfo": {"website": "https://power.example"},
  "createdAt": "2023-01-01T00:00:00Z",
  "updatedAt": "2023-01-01T00:00:00Z"
}"#;

const BROKEN_DATE: &str = r#"{"id": "bad", "startDate": "someday", "frequency": "monthly"}"#;

fn as_of() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 1, 20)
}

#[test]
fn migrate_rewrites_changed_records_and_keeps_backups() -> Result<()> {
    let project = create_temp_project(&[
        ("a-legacy.json", LEGACY),
        ("b-canonical.json", CANONICAL),
        ("c-synonym.json", SYNONYM_ONLY),
        ("d-broken.json", BROKEN_DATE),
    ]);
    let config_path = write_config(project.path(), true);

    let options = MigrateOptions {
        format: None,
        dry_run: false,
        as_of: as_of(),
    };
    let report = execute_migrate(&config_path, &options)?;

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.migrated, 1);
    assert_eq!(report.summary.unchanged, 2);
    let kinds: Vec<_> = report.outcomes.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![
            OutcomeKind::Migrated,
            OutcomeKind::Unchanged,
            OutcomeKind::Normalized,
            OutcomeKind::Failed
        ]
    );

    let data = project.path().join("data");
    let migrated: Value = serde_json::from_str(&fs::read_to_string(data.join("a-legacy.json"))?)?;
    assert_eq!(migrated["status"], json!("active"));
    assert_eq!(migrated["category"], json!("subscription"));
    assert_eq!(migrated["payDate"], json!("2024-02-01"));
    assert_eq!(migrated["contactInfo"], json!({}));
    assert!(migrated.get("paymentInfo").is_none());
    assert!(data.join("a-legacy.json.bak").exists());

    let normalized: Value = serde_json::from_str(&fs::read_to_string(data.join("c-synonym.json"))?)?;
    assert_eq!(normalized["category"], json!("utilities"));

    assert_eq!(fs::read_to_string(data.join("b-canonical.json"))?, CANONICAL);
    assert_eq!(fs::read_to_string(data.join("d-broken.json"))?, BROKEN_DATE);
    assert!(!data.join("b-canonical.json.bak").exists());

    let report_json: Value = serde_json::from_str(&fs::read_to_string(&report.report_path)?)?;
    assert_eq!(report_json["summary"]["total"], json!(4));
    assert_eq!(report_json["summary"]["migrated"], json!(1));
    assert_eq!(report_json["summary"]["failed"], json!(1));
    assert_eq!(report_json["summary"]["written"], json!(2));
    assert_eq!(report_json["records"].as_array().map(Vec::len), Some(4));

    // A second run finds nothing left to do
    let second = execute_migrate(&config_path, &options)?;
    assert_eq!(second.summary.migrated, 0);
    assert!(second
        .outcomes
        .iter()
        .all(|o| o.kind == OutcomeKind::Unchanged || o.kind == OutcomeKind::Failed));
    Ok(())
}

#[test]
fn failed_write_is_reported_and_the_run_continues() -> Result<()> {
    let second = LEGACY.replace("legacy-1", "legacy-2");
    let project = create_temp_project(&[("a.json", LEGACY), ("b.json", &second), ("c.json", LEGACY)]);
    let config_path = write_config(project.path(), true);
    let data = project.path().join("data");
    // A directory in place of the backup file makes the write of b.json fail
    fs::create_dir(data.join("b.json.bak"))?;

    let options = MigrateOptions {
        format: None,
        dry_run: false,
        as_of: as_of(),
    };
    let report = execute_migrate(&config_path, &options)?;

    let kinds: Vec<_> = report.outcomes.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![OutcomeKind::Migrated, OutcomeKind::Failed, OutcomeKind::Migrated]
    );
    let failed = &report.outcomes[1];
    assert_eq!(failed.id.as_deref(), Some("legacy-2"));
    assert!(!failed.written);
    assert!(failed.error.as_deref().is_some_and(|e| e.contains("b.json")));
    assert_eq!(report.summary.migrated, 2);

    assert_eq!(fs::read_to_string(data.join("b.json"))?, second);
    let rewritten: Value = serde_json::from_str(&fs::read_to_string(data.join("c.json"))?)?;
    assert_eq!(rewritten["status"], json!("active"));

    let report_json: Value = serde_json::from_str(&fs::read_to_string(&report.report_path)?)?;
    assert_eq!(report_json["summary"]["total"], json!(3));
    assert_eq!(report_json["summary"]["failed"], json!(1));
    assert_eq!(report_json["summary"]["written"], json!(2));
    Ok(())
}

#[test]
fn dry_run_leaves_records_untouched() -> Result<()> {
    let project = create_temp_project(&[("a-legacy.json", LEGACY)]);
    let config_path = write_config(project.path(), true);

    let options = MigrateOptions {
        format: Some(ReportFormat::Markdown),
        dry_run: true,
        as_of: as_of(),
    };
    let report = execute_migrate(&config_path, &options)?;

    assert_eq!(report.summary.migrated, 1);
    assert!(report.outcomes.iter().all(|o| !o.written));
    let data = project.path().join("data");
    assert_eq!(fs::read_to_string(data.join("a-legacy.json"))?, LEGACY);
    assert!(!data.join("a-legacy.json.bak").exists());

    let markdown = fs::read_to_string(&report.report_path)?;
    assert!(markdown.contains("## Migration Statistics"));
    assert!(markdown.contains("Added missing contactInfo structure"));
    Ok(())
}

#[test]
fn schedule_lists_upcoming_payments_of_active_contracts() -> Result<()> {
    let project = create_temp_project(&[("a-legacy.json", LEGACY), ("b-canonical.json", CANONICAL)]);
    let config_path = write_config(project.path(), false);

    let options = ScheduleOptions {
        id: Some("c-2".to_string()),
        count: None,
        as_of: as_of(),
    };
    let schedules = execute_schedule(&config_path, &options)?;

    assert_eq!(schedules.len(), 1);
    let dates: Vec<_> = schedules[0].payments.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-03-10", "2024-06-10", "2024-09-10"]);

    let missing = ScheduleOptions {
        id: Some("nope".to_string()),
        count: Some(1),
        as_of: as_of(),
    };
    assert!(execute_schedule(&config_path, &missing).is_err());
    Ok(())
}

#[test]
fn costs_sum_active_contracts() -> Result<()> {
    let project = create_temp_project(&[("a-legacy.json", LEGACY), ("b-canonical.json", CANONICAL)]);
    let config_path = write_config(project.path(), false);

    let summary = execute_costs(&config_path)?;
    assert_eq!(summary.active_contracts, 2);
    let usd = &summary.by_currency["USD"];
    assert_eq!(usd.monthly, 250.0);
    assert_eq!(usd.yearly, 3000.0);
    Ok(())
}
