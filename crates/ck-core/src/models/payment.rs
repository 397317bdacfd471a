use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One projected payment. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDate {
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    /// Set on the earliest projected payment only
    pub is_next: bool,
}
