//! Upcoming and overdue bill filtering

use chrono::{Duration, Local, NaiveDate};

use crate::models::Bill;

/// Lookahead used when the caller has no preference
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;

/// Unpaid bills due between today and `days` from now, soonest first
///
/// Uses the local calendar date. See [`upcoming_bills_as_of`].
pub fn upcoming_bills(bills: &[Bill], days: u32) -> Vec<&Bill> {
    upcoming_bills_as_of(bills, days, Local::now().date_naive())
}

/// Unpaid bills due in `[today, today + days]`, soonest first
///
/// The sort is stable, so bills due on the same day keep their input order.
pub fn upcoming_bills_as_of(bills: &[Bill], days: u32, today: NaiveDate) -> Vec<&Bill> {
    let horizon = today
        .checked_add_signed(Duration::days(days as i64))
        .unwrap_or(NaiveDate::MAX);

    let mut due: Vec<&Bill> = bills
        .iter()
        .filter(|b| !b.paid && b.due_date >= today && b.due_date <= horizon)
        .collect();
    due.sort_by_key(|b| b.due_date);

    tracing::debug!(%today, %horizon, matched = due.len(), "filtered upcoming bills");
    due
}

/// Unpaid bills whose due date is before `today`, oldest first
pub fn overdue_bills_as_of(bills: &[Bill], today: NaiveDate) -> Vec<&Bill> {
    let mut overdue: Vec<&Bill> = bills
        .iter()
        .filter(|b| !b.paid && b.due_date < today)
        .collect();
    overdue.sort_by_key(|b| b.due_date);
    overdue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(name: &str, due: NaiveDate) -> Bill {
        Bill::new(name, Money::from_cents(1000), due)
    }

    fn sample() -> Vec<Bill> {
        vec![
            bill("Phone", date(2025, 8, 9)),
            bill("Rent", date(2025, 8, 3)),
            bill("Gym", date(2025, 8, 10)).with_paid(true),
            bill("Water", date(2025, 8, 1)),
            bill("Insurance", date(2025, 8, 10)),
            bill("Streaming", date(2025, 8, 11)),
            bill("Old", date(2025, 7, 20)),
        ]
    }

    #[test]
    fn test_window_is_inclusive_and_sorted() {
        let bills = sample();
        let today = date(2025, 8, 3);
        let due = upcoming_bills_as_of(&bills, 7, today);

        let names: Vec<&str> = due.iter().map(|b| b.description.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Phone", "Insurance"]);
    }

    #[test]
    fn test_never_returns_paid_or_out_of_window() {
        let bills = sample();
        let today = date(2025, 8, 3);
        for days in 0..30 {
            let horizon = today + Duration::days(days as i64);
            for b in upcoming_bills_as_of(&bills, days, today) {
                assert!(!b.paid);
                assert!(b.due_date >= today && b.due_date <= horizon);
            }
        }
    }

    #[test]
    fn test_zero_days_is_today_only() {
        let bills = sample();
        let due = upcoming_bills_as_of(&bills, 0, date(2025, 8, 3));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].description, "Rent");
    }

    #[test]
    fn test_same_day_keeps_input_order() {
        let today = date(2025, 8, 1);
        let bills = vec![bill("B", date(2025, 8, 2)), bill("A", date(2025, 8, 2))];
        let due = upcoming_bills_as_of(&bills, 7, today);
        assert_eq!(due[0].description, "B");
        assert_eq!(due[1].description, "A");
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(upcoming_bills_as_of(&[], 7, date(2025, 1, 1)).is_empty());
        assert!(upcoming_bills_as_of(&sample(), 7, date(2030, 1, 1)).is_empty());
    }

    #[test]
    fn test_overdue() {
        let bills = sample();
        let overdue = overdue_bills_as_of(&bills, date(2025, 8, 3));
        let names: Vec<&str> = overdue.iter().map(|b| b.description.as_str()).collect();
        assert_eq!(names, vec!["Old", "Water"]);
    }

    fn base() -> NaiveDate {
        date(2024, 12, 1)
    }

    /// Bills due within four months of `base()`, some already paid
    fn bill_strategy() -> impl Strategy<Value = Bill> {
        (0i64..120, any::<bool>()).prop_map(|(offset, paid)| {
            bill("Generated", base() + Duration::days(offset)).with_paid(paid)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_upcoming_window_and_paid_rule(
            bills in prop::collection::vec(bill_strategy(), 0..30),
            today_offset in 0i64..120,
            days in 0u32..60,
        ) {
            let today = base() + Duration::days(today_offset);
            let horizon = today + Duration::days(days as i64);
            let due = upcoming_bills_as_of(&bills, days, today);

            for b in &due {
                prop_assert!(!b.paid);
                prop_assert!(b.due_date >= today && b.due_date <= horizon);
            }
            prop_assert!(due.windows(2).all(|w| w[0].due_date <= w[1].due_date));

            let expected = bills
                .iter()
                .filter(|b| !b.paid && b.due_date >= today && b.due_date <= horizon)
                .count();
            prop_assert_eq!(due.len(), expected);
        }

        #[test]
        fn prop_overdue_is_unpaid_and_past(
            bills in prop::collection::vec(bill_strategy(), 0..30),
            today_offset in 0i64..120,
        ) {
            let today = base() + Duration::days(today_offset);
            for b in overdue_bills_as_of(&bills, today) {
                prop_assert!(!b.paid);
                prop_assert!(b.due_date < today);
            }
        }
    }
}
