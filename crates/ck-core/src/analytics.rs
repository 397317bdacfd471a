//! Cost views over canonical contracts.

use crate::models::{Category, Contract};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Amount paid per year (0 for one-time contracts)
pub fn yearly_cost(contract: &Contract) -> f64 {
    contract.amount * f64::from(contract.frequency.payments_per_year())
}

/// Average amount paid per month (0 for one-time contracts)
pub fn monthly_cost(contract: &Contract) -> f64 {
    yearly_cost(contract) / 12.0
}

/// Recurring cost totals for one currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotals {
    pub monthly: f64,
    pub yearly: f64,
    pub contracts: usize,
    pub by_category: BTreeMap<Category, f64>,
}

/// Recurring costs of all active contracts, grouped by currency.
/// Amounts in different currencies are never added together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub active_contracts: usize,
    pub by_currency: BTreeMap<String, CurrencyTotals>,
}

impl CostSummary {
    pub fn from_contracts<'a>(contracts: impl IntoIterator<Item = &'a Contract>) -> Self {
        let mut summary = Self::default();
        for contract in contracts.into_iter().filter(|c| c.is_active()) {
            summary.active_contracts += 1;
            let totals = summary
                .by_currency
                .entry(contract.currency.clone())
                .or_default();
            let monthly = monthly_cost(contract);
            totals.monthly += monthly;
            totals.yearly += yearly_cost(contract);
            totals.contracts += 1;
            *totals.by_category.entry(contract.category).or_insert(0.0) += monthly;
        }
        summary
    }
}
