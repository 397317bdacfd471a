use chrono::{NaiveDate, TimeZone, Utc};
use ck_core::models::{Category, ContactInfo, Contract, Frequency, PaymentDate, Status};
use ck_core::schedule::{
    calculate_next_payment_date, calculate_next_three_payments, format_payment_date,
    is_payment_due_soon,
};
use proptest::prelude::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn contract(start: NaiveDate, frequency: Frequency, end: Option<NaiveDate>) -> Contract {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Contract {
        id: "c-1".into(),
        contract_id: Some("CNT-001".into()),
        name: "Car insurance".into(),
        company: Some("Acme Mutual".into()),
        description: None,
        start_date: start,
        end_date: end,
        pay_date: None,
        amount: 150.0,
        currency: "USD".into(),
        frequency,
        status: Status::Active,
        category: Category::Insurance,
        contact_info: ContactInfo::default(),
        notes: None,
        tags: Vec::new(),
        attachments: Vec::new(),
        document_link: None,
        custom_fields: Default::default(),
        created_at: stamp,
        updated_at: stamp,
    }
}

const RECURRING: [Frequency; 5] = [
    Frequency::Weekly,
    Frequency::BiWeekly,
    Frequency::Monthly,
    Frequency::Quarterly,
    Frequency::Yearly,
];

#[test]
fn one_time_contract_yields_single_start_date_payment() {
    let c = contract(d(2020, 3, 1), Frequency::OneTime, None);
    let payments = calculate_next_three_payments(&c, d(2024, 6, 15)).unwrap();
    assert_eq!(
        payments,
        vec![PaymentDate {
            date: d(2020, 3, 1),
            amount: 150.0,
            currency: "USD".into(),
            is_next: true,
        }]
    );
}

#[test]
fn one_time_next_payment_is_start_date_even_in_the_past() {
    let next =
        calculate_next_payment_date(d(2020, 3, 1), Frequency::OneTime, None, d(2024, 6, 15))
            .unwrap();
    assert_eq!(next, d(2020, 3, 1));
}

#[test]
fn monthly_from_january_31st_clamps_to_end_of_february() {
    let leap =
        calculate_next_payment_date(d(2024, 1, 31), Frequency::Monthly, None, d(2024, 1, 20))
            .unwrap();
    assert_eq!(leap, d(2024, 2, 29));

    let common =
        calculate_next_payment_date(d(2023, 1, 31), Frequency::Monthly, None, d(2023, 1, 20))
            .unwrap();
    assert_eq!(common, d(2023, 2, 28));
}

#[test]
fn stale_anchor_is_forced_into_the_future() {
    let today = d(2024, 6, 15);
    for frequency in RECURRING {
        let next = calculate_next_payment_date(d(1999, 12, 31), frequency, None, today).unwrap();
        assert!(next > today, "{frequency}: {next} is not after {today}");
    }
}

#[test]
fn due_soon_boundaries() {
    let today = d(2024, 6, 15);
    assert!(is_payment_due_soon(d(2024, 6, 22), today, 7));
    assert!(!is_payment_due_soon(d(2024, 6, 23), today, 7));
    assert!(!is_payment_due_soon(d(2024, 6, 14), today, 7));
}

#[test]
fn display_strings() {
    let today = d(2024, 6, 15);
    assert_eq!(format_payment_date(d(2024, 6, 15), today), "Today");
    assert_eq!(format_payment_date(d(2024, 6, 16), today), "Tomorrow");
    assert_eq!(format_payment_date(d(2024, 7, 4), today), "Jul 4, 2024");
}

#[test]
fn schedule_is_chronological_and_marks_only_first() {
    let c = contract(d(2024, 1, 31), Frequency::Monthly, None);
    let payments = calculate_next_three_payments(&c, d(2024, 1, 31)).unwrap();
    let dates: Vec<_> = payments.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![d(2024, 2, 29), d(2024, 3, 29), d(2024, 4, 29)]);
    assert_eq!(
        payments.iter().filter(|p| p.is_next).count(),
        1,
        "exactly one payment is next"
    );
}

#[test]
fn schedule_stops_at_end_date() {
    let c = contract(d(2024, 1, 1), Frequency::Weekly, Some(d(2024, 1, 15)));
    let payments = calculate_next_three_payments(&c, d(2024, 1, 3)).unwrap();
    let dates: Vec<_> = payments.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![d(2024, 1, 8), d(2024, 1, 15)]);
}

#[test]
fn repeated_calls_are_independent() {
    let c = contract(d(2024, 2, 29), Frequency::Yearly, None);
    let today = d(2024, 3, 1);
    let first = calculate_next_three_payments(&c, today).unwrap();
    let second = calculate_next_three_payments(&c, today).unwrap();
    assert_eq!(first, second);
    let dates: Vec<_> = first.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![d(2025, 2, 28), d(2026, 2, 28), d(2027, 2, 28)]);
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1950i32..2100, 1u32..=12, 1u32..=31).prop_map(|(y, m, day)| {
        NaiveDate::from_ymd_opt(y, m, day)
            .or_else(|| NaiveDate::from_ymd_opt(y, m, 28))
            .unwrap()
    })
}

fn any_recurring() -> impl Strategy<Value = Frequency> {
    prop::sample::select(RECURRING.to_vec())
}

proptest! {
    #[test]
    fn next_payment_is_always_after_today(
        start in any_date(),
        today in any_date(),
        frequency in any_recurring(),
    ) {
        let next = calculate_next_payment_date(start, frequency, None, today).unwrap();
        prop_assert!(next > today);
        prop_assert!(next > start);
    }

    #[test]
    fn upcoming_payments_never_pass_end_date(
        start in any_date(),
        today in any_date(),
        end in any_date(),
        frequency in any_recurring(),
    ) {
        let c = contract(start, frequency, Some(end));
        let payments = calculate_next_three_payments(&c, today).unwrap();
        prop_assert!(payments.len() <= 3);
        prop_assert!(payments.iter().all(|p| p.date <= end && p.date > today));
        prop_assert!(payments.windows(2).all(|w| w[0].date < w[1].date));
        if let Some(first) = payments.first() {
            prop_assert!(first.is_next);
        }
    }
}
