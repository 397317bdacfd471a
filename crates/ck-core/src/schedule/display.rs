use crate::schedule::calendar::days_until;
use chrono::NaiveDate;

/// Window, in days, within which a payment counts as due soon
pub const DEFAULT_DUE_SOON_DAYS: i64 = 7;

/// Renders a payment date for display: "Today", "Tomorrow", or a short
/// date such as "Jan 5, 2024".
pub fn format_payment_date(date: NaiveDate, today: NaiveDate) -> String {
    match days_until(date, today) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// True when `date` is between today and `threshold_days` from now, both ends
/// included. Past dates are never due soon.
pub fn is_payment_due_soon(date: NaiveDate, today: NaiveDate, threshold_days: i64) -> bool {
    let days = days_until(date, today);
    (0..=threshold_days).contains(&days)
}
