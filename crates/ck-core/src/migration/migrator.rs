use crate::error::Result;
use crate::migration::steps::{
    CategoryStep, ContactInfoStep, MigrationContext, MigrationStep, PaymentInfoStep, StatusStep,
};
use crate::models::{
    Category, ContactInfo, Contract, ContractRecord, LegacyContract, MigrationResult,
    MigrationSummary, Status,
};
use crate::schedule::parse_calendar_date;
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

/// Runs migration steps over legacy records
pub struct Migrator {
    steps: Vec<Box<dyn MigrationStep>>,
}

impl Migrator {
    /// Creates a migrator with the default steps: payment info, status,
    /// contact info, category. Notes follow this order.
    pub fn new() -> Self {
        let mut migrator = Self { steps: Vec::new() };

        migrator.add_step(Box::new(PaymentInfoStep));
        migrator.add_step(Box::new(StatusStep));
        migrator.add_step(Box::new(ContactInfoStep));
        migrator.add_step(Box::new(CategoryStep));

        migrator
    }

    /// Appends a step; it runs after the existing ones
    pub fn add_step(&mut self, step: Box<dyn MigrationStep>) {
        self.steps.push(step);
    }

    /// Brings a record into the current schema. Canonical records come back
    /// unchanged with no notes.
    pub fn migrate(&self, record: ContractRecord, now: DateTime<Utc>) -> Result<MigrationResult> {
        match record {
            ContractRecord::Canonical(contract) => Ok(MigrationResult {
                contract: *contract,
                was_migrated: false,
                migration_notes: Vec::new(),
            }),
            ContractRecord::Legacy(legacy) => self.migrate_legacy(&legacy, now),
        }
    }

    /// Classifies and migrates a raw JSON record
    pub fn migrate_value(&self, value: &Value, now: DateTime<Utc>) -> Result<MigrationResult> {
        let record = ContractRecord::from_value(value.clone())?;
        self.migrate(record, now)
    }

    fn migrate_legacy(
        &self,
        legacy: &LegacyContract,
        now: DateTime<Utc>,
    ) -> Result<MigrationResult> {
        let ctx = MigrationContext::new(now);
        let mut contract = carry_over(legacy, now)?;
        let mut was_migrated = false;
        let mut migration_notes = Vec::new();

        for step in &self.steps {
            let outcome = step.apply(legacy, &mut contract, &ctx)?;
            if let Some(note) = outcome.note {
                tracing::debug!(id = %legacy.id, step = step.name(), note = %note, "Migration step applied");
                migration_notes.push(note);
            }
            was_migrated |= outcome.migrated;
        }

        if was_migrated {
            tracing::info!(
                id = %legacy.id,
                notes = migration_notes.len(),
                "Migrated legacy contract"
            );
        }

        Ok(MigrationResult {
            contract,
            was_migrated,
            migration_notes,
        })
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies every field that passes through unchanged. Status, category and
/// contact info get placeholders that the steps overwrite.
fn carry_over(legacy: &LegacyContract, now: DateTime<Utc>) -> Result<Contract> {
    let optional_date = |field: &str, raw: &Option<String>| {
        raw.as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_calendar_date(field, s))
            .transpose()
    };
    let timestamp = |field: &str, raw: &Option<String>| -> Result<DateTime<Utc>> {
        match raw.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(s) => parse_timestamp(field, s),
            None => Ok(now),
        }
    };

    Ok(Contract {
        id: legacy.id.clone(),
        contract_id: legacy.contract_id.clone(),
        name: legacy.name.clone(),
        company: legacy.company.clone(),
        description: legacy.description.clone(),
        start_date: parse_calendar_date("startDate", &legacy.start_date)?,
        end_date: optional_date("endDate", &legacy.end_date)?,
        pay_date: optional_date("payDate", &legacy.pay_date)?,
        amount: legacy.amount,
        currency: legacy.currency.clone(),
        frequency: legacy.frequency,
        status: Status::Active,
        category: Category::Other,
        contact_info: ContactInfo::default(),
        notes: legacy.notes.clone(),
        tags: legacy.tags.clone().unwrap_or_default(),
        attachments: legacy.attachments.clone().unwrap_or_default(),
        document_link: legacy.document_link.clone(),
        custom_fields: legacy.custom_fields.clone().unwrap_or_default(),
        created_at: timestamp("createdAt", &legacy.created_at)?,
        updated_at: timestamp("updatedAt", &legacy.updated_at)?,
    })
}

/// Reads an audit timestamp. RFC 3339 keeps its instant; an offset-less
/// datetime is taken as UTC and a bare date as midnight UTC.
fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    let date = parse_calendar_date(field, trimmed)?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Whether a stored record still has a legacy shape
pub fn needs_migration(record: &LegacyContract) -> bool {
    record.needs_migration()
}

/// Migrates one record with the default steps
pub fn migrate_contract(record: ContractRecord, now: DateTime<Utc>) -> Result<MigrationResult> {
    Migrator::new().migrate(record, now)
}

/// Classifies and migrates one raw JSON record with the default steps
pub fn migrate_value(value: &Value, now: DateTime<Utc>) -> Result<MigrationResult> {
    Migrator::new().migrate_value(value, now)
}

/// Migrates a batch. Output order matches input order; a failing record
/// does not affect the others.
pub fn migrate_contracts(records: &[Value], now: DateTime<Utc>) -> Vec<Result<MigrationResult>> {
    let migrator = Migrator::new();
    records
        .iter()
        .map(|value| migrator.migrate_value(value, now))
        .collect()
}

/// Counts migrated and unchanged records and gathers the notes of the
/// migrated ones
pub fn get_migration_summary(results: &[MigrationResult]) -> MigrationSummary {
    let total = results.len();
    let migrated: Vec<&MigrationResult> = results.iter().filter(|r| r.was_migrated).collect();

    MigrationSummary {
        total,
        migrated: migrated.len(),
        unchanged: total - migrated.len(),
        migration_notes: migrated
            .iter()
            .flat_map(|r| r.migration_notes.iter().cloned())
            .collect(),
    }
}
