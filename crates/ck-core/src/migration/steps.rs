use crate::error::Result;
use crate::models::{
    Category, ContactInfo, Contract, LegacyContract, PaymentInfo, Status, LEGACY_STATUSES,
};
use crate::schedule::{calculate_next_payment_date, parse_calendar_date};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Reference instant a migration runs against
#[derive(Debug, Clone, Copy)]
pub struct MigrationContext {
    /// Used for default audit timestamps
    pub now: DateTime<Utc>,
    /// Used when a payment date has to be derived
    pub today: NaiveDate,
}

impl MigrationContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }
}

/// What a step did to the record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Audit note, if the step changed something worth reporting
    pub note: Option<String>,
    /// Whether the change counts as a schema migration
    pub migrated: bool,
}

impl StepOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn migrated(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            migrated: true,
        }
    }

    pub fn noted(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            migrated: false,
        }
    }
}

/// One transformation applied while upgrading a legacy record
pub trait MigrationStep: Send + Sync {
    /// Reads from `source` and writes the step's fields into `target`
    fn apply(
        &self,
        source: &LegacyContract,
        target: &mut Contract,
        ctx: &MigrationContext,
    ) -> Result<StepOutcome>;

    /// Step name
    fn name(&self) -> &str;
}

/// Replaces the deprecated `paymentInfo` object with a `payDate`
pub struct PaymentInfoStep;

impl MigrationStep for PaymentInfoStep {
    fn apply(
        &self,
        source: &LegacyContract,
        target: &mut Contract,
        ctx: &MigrationContext,
    ) -> Result<StepOutcome> {
        let Some(raw) = &source.payment_info else {
            return Ok(StepOutcome::unchanged());
        };

        let info = PaymentInfo::from_raw(raw);
        let pay_date = match info.next_payment_date.as_deref() {
            Some(next) => parse_calendar_date("paymentInfo.nextPaymentDate", next)?,
            None => {
                let last = info
                    .last_payment_date
                    .as_deref()
                    .map(|last| parse_calendar_date("paymentInfo.lastPaymentDate", last))
                    .transpose()?;
                calculate_next_payment_date(target.start_date, target.frequency, last, ctx.today)?
            }
        };
        target.pay_date = Some(pay_date);

        Ok(StepOutcome::migrated(
            "Migrated from paymentInfo object to calculated payDate",
        ))
    }

    fn name(&self) -> &str {
        "payment_info"
    }
}

/// Collapses legacy statuses into the canonical set
pub struct StatusStep;

impl MigrationStep for StatusStep {
    fn apply(
        &self,
        source: &LegacyContract,
        target: &mut Contract,
        _ctx: &MigrationContext,
    ) -> Result<StepOutcome> {
        let raw = source.status.as_deref();
        if let Some(status) = raw.and_then(Status::parse) {
            target.status = status;
            return Ok(StepOutcome::unchanged());
        }

        target.status = Status::Active;
        match raw {
            Some(legacy) if LEGACY_STATUSES.contains(&legacy) => Ok(StepOutcome::migrated(
                format!("Migrated status from '{}' to 'active'", legacy),
            )),
            Some(unknown) => {
                tracing::warn!(id = %source.id, status = %unknown, "Unknown status, defaulting to active");
                Ok(StepOutcome::noted(format!(
                    "Unknown status '{}', defaulting to 'active'",
                    unknown
                )))
            }
            None => {
                tracing::warn!(id = %source.id, "Missing status, defaulting to active");
                Ok(StepOutcome::noted("Missing status, defaulting to 'active'"))
            }
        }
    }

    fn name(&self) -> &str {
        "status"
    }
}

/// Guarantees a well-formed `contactInfo` object
pub struct ContactInfoStep;

impl MigrationStep for ContactInfoStep {
    fn apply(
        &self,
        source: &LegacyContract,
        target: &mut Contract,
        _ctx: &MigrationContext,
    ) -> Result<StepOutcome> {
        let Some(raw) = &source.contact_info else {
            target.contact_info = ContactInfo::default();
            return Ok(StepOutcome::migrated("Added missing contactInfo structure"));
        };

        match normalize_contact_info(raw) {
            Some(contact_info) => {
                target.contact_info = contact_info;
                Ok(StepOutcome::unchanged())
            }
            None => {
                target.contact_info = ContactInfo::default();
                Ok(StepOutcome::noted("Fixed malformed contactInfo structure"))
            }
        }
    }

    fn name(&self) -> &str {
        "contact_info"
    }
}

/// Maps free-form categories onto the canonical set
pub struct CategoryStep;

impl MigrationStep for CategoryStep {
    fn apply(
        &self,
        source: &LegacyContract,
        target: &mut Contract,
        _ctx: &MigrationContext,
    ) -> Result<StepOutcome> {
        let category = normalize_category(source.category.as_deref());
        if source.category.as_deref() != Some(category.as_str()) {
            tracing::debug!(
                id = %source.id,
                from = ?source.category,
                to = %category,
                "Normalized category"
            );
        }
        target.category = category;
        Ok(StepOutcome::unchanged())
    }

    fn name(&self) -> &str {
        "category"
    }
}

/// Extracts the known contact subfields.
///
/// Returns `None` when the value is not an object or none of the known
/// subfields holds a string. Unknown keys are dropped.
pub fn normalize_contact_info(raw: &Value) -> Option<ContactInfo> {
    let object = raw.as_object()?;
    let field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
    let contact_info = ContactInfo {
        email: field("email"),
        phone: field("phone"),
        address: field("address"),
        website: field("website"),
        contact_person: field("contactPerson"),
    };
    (!contact_info.is_empty()).then_some(contact_info)
}

const CATEGORY_SYNONYMS: [(&str, Category); 4] = [
    ("subscriptions", Category::Subscription),
    ("utility", Category::Utilities),
    ("rental", Category::Rent),
    ("service", Category::Services),
];

/// Resolves a stored category: exact canonical names first, then a
/// case-insensitive lookup over canonical names and known synonyms.
/// Anything else becomes [`Category::Other`].
pub fn normalize_category(raw: Option<&str>) -> Category {
    let Some(raw) = raw else {
        return Category::Other;
    };
    if let Some(category) = Category::parse(raw) {
        return category;
    }

    let lowered = raw.trim().to_lowercase();
    Category::parse(&lowered)
        .or_else(|| {
            CATEGORY_SYNONYMS
                .iter()
                .find(|(synonym, _)| *synonym == lowered)
                .map(|(_, category)| *category)
        })
        .unwrap_or(Category::Other)
}
