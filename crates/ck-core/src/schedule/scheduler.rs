use crate::error::Result;
use crate::models::{Contract, Frequency, PaymentDate};
use crate::schedule::calendar::advance;
use chrono::NaiveDate;

/// Number of upcoming payments shown by default
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Computes the next payment date strictly after `today`.
///
/// One-time contracts always return `start_date`. Otherwise the anchor
/// (`last_payment_date`, or `start_date` when absent) is advanced by one
/// period, and the result keeps advancing until it is after `today`.
pub fn calculate_next_payment_date(
    start_date: NaiveDate,
    frequency: Frequency,
    last_payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate> {
    if frequency == Frequency::OneTime {
        return Ok(start_date);
    }

    let anchor = last_payment_date.unwrap_or(start_date);
    let mut next = advance(anchor, frequency)?;
    while next <= today {
        next = advance(next, frequency)?;
    }
    Ok(next)
}

/// Projects up to `count` upcoming payments of a contract, oldest first.
///
/// Payments falling after `end_date` are not emitted; a payment exactly on
/// `end_date` is.
pub fn upcoming_payments(
    contract: &Contract,
    count: usize,
    today: NaiveDate,
) -> Result<Vec<PaymentDate>> {
    let payment = |date: NaiveDate, is_next: bool| PaymentDate {
        date,
        amount: contract.amount,
        currency: contract.currency.clone(),
        is_next,
    };

    if contract.frequency == Frequency::OneTime {
        return Ok(vec![payment(contract.start_date, true)]);
    }

    let mut payments = Vec::with_capacity(count);
    let mut candidate =
        calculate_next_payment_date(contract.start_date, contract.frequency, None, today)?;
    while payments.len() < count {
        if contract.end_date.is_some_and(|end| candidate > end) {
            break;
        }
        payments.push(payment(candidate, payments.is_empty()));
        if payments.len() < count {
            candidate = advance(candidate, contract.frequency)?;
        }
    }

    tracing::trace!(
        id = %contract.id,
        frequency = %contract.frequency,
        count = payments.len(),
        "Projected upcoming payments"
    );
    Ok(payments)
}

/// The next three payments of a contract
pub fn calculate_next_three_payments(
    contract: &Contract,
    today: NaiveDate,
) -> Result<Vec<PaymentDate>> {
    upcoming_payments(contract, DEFAULT_LOOKAHEAD, today)
}
