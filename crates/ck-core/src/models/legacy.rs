use crate::error::Result;
use crate::models::{Contract, Frequency};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Record as found in storage, possibly written by an older schema.
///
/// Every field is lenient: status and category are free strings, dates are
/// kept raw until the migrator parses them, and `contactInfo`/`paymentInfo`
/// distinguish an absent key (`None`) from an explicit `null`
/// (`Some(Value::Null)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyContract {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub pay_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default = "default_currency", deserialize_with = "null_as_default_currency")]
    pub currency: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Value>,
    /// Deprecated payment substructure
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub payment_info: Option<Value>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
    #[serde(default)]
    pub document_link: Option<String>,
    #[serde(default)]
    pub custom_fields: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Reads an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_currency<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key
/// (handled by `#[serde(default)]`) yields `None`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Typed view over the deprecated `paymentInfo` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(default)]
    pub next_payment_date: Option<String>,
    #[serde(default)]
    pub last_payment_date: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub auto_renew: Option<bool>,
    #[serde(default)]
    pub late_fees: Option<f64>,
}

impl PaymentInfo {
    /// Reads whatever usable fields a raw `paymentInfo` value carries.
    /// Non-objects and mistyped fields read as empty.
    pub fn from_raw(raw: &Value) -> Self {
        let Some(object) = raw.as_object() else {
            return Self::default();
        };
        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        Self {
            next_payment_date: text("nextPaymentDate"),
            last_payment_date: text("lastPaymentDate"),
            payment_method: text("paymentMethod"),
            account_number: text("accountNumber"),
            auto_renew: object.get("autoRenew").and_then(Value::as_bool),
            late_fees: object.get("lateFees").and_then(Value::as_f64),
        }
    }
}

/// Legacy status values that collapse into `active`
pub const LEGACY_STATUSES: [&str; 2] = ["pending", "draft"];

impl LegacyContract {
    /// Whether this record carries any legacy marker: a `paymentInfo` key,
    /// a `pending`/`draft` status, or a missing `contactInfo` key.
    pub fn needs_migration(&self) -> bool {
        self.payment_info.is_some()
            || self
                .status
                .as_deref()
                .is_some_and(|s| LEGACY_STATUSES.contains(&s))
            || self.contact_info.is_none()
    }
}

/// A stored record, discriminated by shape
#[derive(Debug, Clone, PartialEq)]
pub enum ContractRecord {
    /// Needs migration or normalisation before use
    Legacy(Box<LegacyContract>),
    /// Already conforms to the current schema
    Canonical(Box<Contract>),
}

impl ContractRecord {
    /// Classifies a raw JSON record.
    ///
    /// Records carrying a legacy marker are `Legacy`. Anything else is
    /// `Canonical` if it parses strictly as a [`Contract`], and `Legacy`
    /// otherwise so the migrator can normalise it.
    pub fn from_value(value: Value) -> Result<Self> {
        let legacy: LegacyContract = serde_json::from_value(value.clone())?;
        if legacy.needs_migration() {
            return Ok(Self::Legacy(Box::new(legacy)));
        }
        match serde_json::from_value::<Contract>(value) {
            Ok(contract) => Ok(Self::Canonical(Box::new(contract))),
            Err(err) => {
                tracing::debug!(
                    id = %legacy.id,
                    error = %err,
                    "Record is not canonical, routing through migration"
                );
                Ok(Self::Legacy(Box::new(legacy)))
            }
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Legacy(legacy) => &legacy.id,
            Self::Canonical(contract) => &contract.id,
        }
    }

    pub fn needs_migration(&self) -> bool {
        match self {
            Self::Legacy(legacy) => legacy.needs_migration(),
            Self::Canonical(_) => false,
        }
    }
}

impl From<Contract> for ContractRecord {
    fn from(contract: Contract) -> Self {
        Self::Canonical(Box::new(contract))
    }
}

impl From<LegacyContract> for ContractRecord {
    fn from(legacy: LegacyContract) -> Self {
        Self::Legacy(Box::new(legacy))
    }
}
