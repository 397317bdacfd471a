//! Payment schedule projection.
//!
//! All functions are pure and take the reference date (`today`) explicitly.
//! Callers normally pass `Utc::now().date_naive()`.

pub mod calendar;
pub mod display;
pub mod scheduler;

pub use calendar::{advance, days_until, parse_calendar_date};
pub use display::{format_payment_date, is_payment_due_soon, DEFAULT_DUE_SOON_DAYS};
pub use scheduler::{
    calculate_next_payment_date, calculate_next_three_payments, upcoming_payments,
    DEFAULT_LOOKAHEAD,
};
