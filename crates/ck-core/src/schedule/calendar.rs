use crate::error::{CkError, Result};
use crate::models::Frequency;
use chrono::{DateTime, Days, Months, NaiveDate};

/// Moves `date` forward by one period of `frequency`.
///
/// Month-based steps keep the day of month and clamp to the last day of
/// shorter target months: Jan 31 + 1 month is Feb 28 (Feb 29 in leap years),
/// Feb 29 + 1 year is Feb 28. One-time contracts have no period, so the date
/// is returned unchanged.
pub fn advance(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    let next = match frequency {
        Frequency::OneTime => Some(date),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::BiWeekly => date.checked_add_days(Days::new(14)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Quarterly => date.checked_add_months(Months::new(3)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.ok_or(CkError::DateOutOfRange { date, frequency })
}

/// Parses a stored date value.
///
/// Accepts a plain calendar date (`2024-01-31`) or an RFC 3339 timestamp, in
/// which case the UTC calendar date is used.
pub fn parse_calendar_date(field: &str, raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.naive_utc().date())
        .map_err(|_| CkError::invalid_date(field, raw))
}

/// Signed number of days from `today` to `date`
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}
