use crate::commands::{load_config, load_contracts, reference_instant};
use anyhow::Result;
use chrono::NaiveDate;
use ck_core::models::PaymentDate;
use ck_core::schedule::{format_payment_date, is_payment_due_soon, upcoming_payments};
use colored::Colorize;
use serde::Serialize;

/// Options of the schedule command
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    /// Only this contract id
    pub id: Option<String>,
    /// Overrides `[schedule] lookahead`
    pub count: Option<usize>,
    /// Reference date instead of today
    pub as_of: Option<NaiveDate>,
}

/// Upcoming payments of one contract
#[derive(Debug, Clone, Serialize)]
pub struct ContractSchedule {
    pub id: String,
    pub name: String,
    pub payments: Vec<PaymentDate>,
}

/// Prints upcoming payments of every active contract
pub fn execute_schedule(config_path: &str, options: &ScheduleOptions) -> Result<Vec<ContractSchedule>> {
    let config = load_config(config_path)?;
    let now = reference_instant(options.as_of);
    let today = now.date_naive();
    let count = options.count.unwrap_or(config.schedule.lookahead);

    let mut schedules = Vec::new();
    for contract in load_contracts(&config, now)? {
        if !contract.is_active() {
            continue;
        }
        if options.id.as_deref().is_some_and(|id| id != contract.id) {
            continue;
        }
        let payments = upcoming_payments(&contract, count, today)?;
        schedules.push(ContractSchedule {
            id: contract.id,
            name: contract.name,
            payments,
        });
    }

    if let Some(id) = &options.id {
        if schedules.is_empty() {
            anyhow::bail!("No active contract with id: {}", id);
        }
    }

    for schedule in &schedules {
        println!("{} ({})", schedule.name.bold(), schedule.id.dimmed());
        if schedule.payments.is_empty() {
            println!("  {}", "no upcoming payments".dimmed());
        }
        for payment in &schedule.payments {
            let label = format_payment_date(payment.date, today);
            let line = format!("{:.2} {}  {}", payment.amount, payment.currency, label);
            if is_payment_due_soon(payment.date, today, config.schedule.due_soon_days) {
                println!("  {} {}", "●".yellow(), line.yellow());
            } else {
                println!("  {} {}", if payment.is_next { "→" } else { " " }, line);
            }
        }
    }

    Ok(schedules)
}
