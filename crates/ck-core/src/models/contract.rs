use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a contract is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// Paid exactly once, on the start date
    #[serde(alias = "once", alias = "onetime")]
    OneTime,
    Weekly,
    #[serde(alias = "biweekly")]
    BiWeekly,
    Monthly,
    Quarterly,
    #[serde(alias = "annual", alias = "annually")]
    Yearly,
}

impl Frequency {
    /// Wire name of the frequency
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Number of payments in a calendar year (0 for one-time contracts)
    pub fn payments_per_year(&self) -> u32 {
        match self {
            Frequency::OneTime => 0,
            Frequency::Weekly => 52,
            Frequency::BiWeekly => 26,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
            Frequency::Yearly => 1,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a canonical contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Expired,
    Cancelled,
    Terminated,
    Closed,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Active,
        Status::Expired,
        Status::Cancelled,
        Status::Terminated,
        Status::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Expired => "expired",
            Status::Cancelled => "cancelled",
            Status::Terminated => "terminated",
            Status::Closed => "closed",
        }
    }

    /// Exact, case-sensitive match against the canonical wire names
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Category {
    Subscription,
    Insurance,
    Utilities,
    Rent,
    Services,
    Maintenance,
    /// Fallback for anything that does not map to a known category
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Subscription,
        Category::Insurance,
        Category::Utilities,
        Category::Rent,
        Category::Services,
        Category::Maintenance,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Subscription => "subscription",
            Category::Insurance => "insurance",
            Category::Utilities => "utilities",
            Category::Rent => "rent",
            Category::Services => "services",
            Category::Maintenance => "maintenance",
            Category::Other => "other",
        }
    }

    /// Exact, case-sensitive match against the canonical wire names
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details of the counterparty. Always present on a canonical contract,
/// every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

impl ContactInfo {
    /// Wire names of the known subfields, in declaration order
    pub const FIELDS: [&'static str; 5] = ["email", "phone", "address", "website", "contactPerson"];

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.website.is_none()
            && self.contact_person.is_none()
    }
}

/// Contract record in the current schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    /// Externally visible identifier (e.g. "CNT-2024-001")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Last known or derived next payment date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_date: Option<NaiveDate>,
    pub amount: f64,
    pub currency: String,
    pub frequency: Frequency,
    pub status: Status,
    pub category: Category,
    pub contact_info: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque attachment descriptors owned by the storage layer
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_link: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom_fields: IndexMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}
