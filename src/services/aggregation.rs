//! Income/expense aggregation
//!
//! Pure functions over a snapshot of transactions. Inputs are only read;
//! every call builds fresh results.

use std::collections::HashMap;

use crate::models::{
    Aggregate, AnnualSummary, CategoryTotal, DateRange, Money, MonthlyPoint, Transaction, YearMonth,
};

/// Number of months in a rolling series when the caller has no preference
pub const DEFAULT_ROLLING_WINDOW: usize = 12;

/// Label used for transactions with no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Sum income and expense booked under one month
///
/// Only transactions whose month key equals `YYYY-MM` for the given month
/// and year contribute. `month` outside 1-12 is clamped.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use fintrack::models::{Money, Transaction};
/// use fintrack::services::aggregate_month;
///
/// let day = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
/// let txns = vec![
///     Transaction::income(day, Money::from_cents(650000)),
///     Transaction::expense(day, Money::from_cents(18050)),
/// ];
/// let agg = aggregate_month(&txns, 8, 2025);
/// assert_eq!(agg.balance, Money::from_cents(631950));
/// ```
pub fn aggregate_month(transactions: &[Transaction], month: u32, year: i32) -> Aggregate {
    let key = YearMonth::clamped(year, month);
    let aggregate = Aggregate::from_transactions(transactions.iter().filter(|t| t.month == key));
    tracing::debug!(month = %key, income = %aggregate.income, expense = %aggregate.expense, "aggregated month");
    aggregate
}

/// Trailing series of monthly aggregates ending at `end_month`/`end_year`
///
/// Returns exactly `window` points ordered oldest to newest. The last point
/// covers the end month itself, so it always equals
/// `aggregate_month(transactions, end_month, end_year)`.
pub fn aggregate_rolling(
    transactions: &[Transaction],
    end_month: u32,
    end_year: i32,
    window: usize,
) -> Vec<MonthlyPoint> {
    let end = YearMonth::clamped(end_year, end_month);
    let buckets = bucket_by_month(transactions);

    let series: Vec<MonthlyPoint> = (0..window)
        .rev()
        .map(|offset| {
            let month = end.months_before(offset as u32);
            let aggregate = buckets.get(&month).copied().unwrap_or_default();
            MonthlyPoint::new(month, aggregate)
        })
        .collect();

    tracing::debug!(end = %end, window, "built rolling series");
    series
}

/// Aggregates for every month key present in the input
fn bucket_by_month(transactions: &[Transaction]) -> HashMap<YearMonth, Aggregate> {
    let mut buckets: HashMap<YearMonth, Aggregate> = HashMap::new();
    for txn in transactions {
        let entry = buckets.entry(txn.month).or_default();
        *entry = entry.with(txn);
    }
    buckets
}

/// Sum income and expense for transactions dated inside `range`
///
/// Unlike [`aggregate_month`] this looks at the transaction date, which is
/// what quarterly, yearly and custom periods are defined by.
pub fn aggregate_range(transactions: &[Transaction], range: &DateRange) -> Aggregate {
    Aggregate::from_transactions(transactions.iter().filter(|t| range.contains(t.date)))
}

/// January through December of `year`, plus the yearly total
pub fn aggregate_year(transactions: &[Transaction], year: i32) -> AnnualSummary {
    let months = aggregate_rolling(transactions, 12, year, 12);
    let total = months.iter().map(|p| p.aggregate).sum();
    AnnualSummary {
        year: YearMonth::clamped(year, 12).year(),
        months,
        total,
    }
}

/// Expense totals per category for transactions dated inside `range`
///
/// Sorted by total descending, then by category name.
pub fn spending_by_category(transactions: &[Transaction], range: &DateRange) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && range.contains(t.date))
    {
        let name = if txn.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            txn.category.as_str()
        };
        let entry = totals.entry(name).or_insert((Money::zero(), 0));
        entry.0 += txn.value;
        entry.1 += 1;
    }

    let grand_total: Money = totals.values().map(|(total, _)| *total).sum();

    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            transaction_count: count,
            percentage: total.percent_of(grand_total),
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    rows
}
