use crate::commands::{load_config, load_contracts, reference_instant};
use anyhow::Result;
use ck_core::analytics::CostSummary;
use colored::Colorize;

/// Prints recurring costs of active contracts per currency
pub fn execute_costs(config_path: &str) -> Result<CostSummary> {
    let config = load_config(config_path)?;
    let contracts = load_contracts(&config, reference_instant(None))?;
    let summary = CostSummary::from_contracts(&contracts);

    println!(
        "{} {}",
        "Active contracts:".bold(),
        summary.active_contracts
    );
    for (currency, totals) in &summary.by_currency {
        println!(
            "\n{}  {:.2}/month  {:.2}/year  ({} contracts)",
            currency.bold(),
            totals.monthly,
            totals.yearly,
            totals.contracts
        );
        for (category, monthly) in &totals.by_category {
            println!("  {:<12} {:>10.2}/month", category.to_string(), monthly);
        }
    }

    Ok(summary)
}
