use crate::models::Frequency;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the scheduling and migration engine
#[derive(Debug, Error)]
pub enum CkError {
    /// A date-bearing field could not be parsed as a calendar date
    #[error("invalid date in field '{field}': {value:?}")]
    InvalidDate {
        /// Record field the value came from (e.g. "startDate")
        field: String,
        /// Raw value as found in the record
        value: String,
    },
    /// Advancing a date left the representable calendar range
    #[error("date {date} cannot be advanced by one {frequency} period")]
    DateOutOfRange { date: NaiveDate, frequency: Frequency },
    /// The record is not a JSON object or misses fields required by every shape
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

impl CkError {
    pub fn invalid_date(field: &str, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CkError>;
