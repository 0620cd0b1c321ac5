//! Budget usage evaluation

use crate::models::{BudgetUsage, Money, Transaction};

/// Compare expense spending against a budget ceiling
///
/// Returns `None` when no budget is configured (absent or zero). Otherwise
/// `remaining` carries the true signed difference, while `percent` is capped
/// to 0-100 for display.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use fintrack::models::{Money, Transaction};
/// use fintrack::services::evaluate_budget;
///
/// let day = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
/// let txns = vec![Transaction::expense(day, Money::from_cents(120000))];
/// let usage = evaluate_budget(&txns, Some(Money::from_cents(100000))).unwrap();
/// assert_eq!(usage.remaining, Money::from_cents(-20000));
/// assert_eq!(usage.percent, 100.0);
/// ```
pub fn evaluate_budget(transactions: &[Transaction], budget: Option<Money>) -> Option<BudgetUsage> {
    let budget = budget.filter(|b| !b.is_zero())?;

    let spent: Money = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.value)
        .sum();
    let percent = spent.percent_of(budget).clamp(0.0, 100.0);

    let usage = BudgetUsage {
        budget,
        spent,
        remaining: budget - spent,
        percent,
    };
    if usage.is_overspent() {
        tracing::debug!(budget = %budget, spent = %spent, "budget exceeded");
    }
    Some(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 5).unwrap()
    }

    fn spending(amounts: &[i64]) -> Vec<Transaction> {
        amounts
            .iter()
            .map(|c| Transaction::expense(day(), Money::from_cents(*c)))
            .collect()
    }

    #[test]
    fn test_no_budget() {
        let txns = spending(&[1000]);
        assert!(evaluate_budget(&txns, None).is_none());
        assert!(evaluate_budget(&txns, Some(Money::zero())).is_none());
    }

    #[test]
    fn test_overspend_caps_percent_not_remaining() {
        let txns = spending(&[70000, 50000]);
        let usage = evaluate_budget(&txns, Some(Money::from_cents(100000))).unwrap();

        assert_eq!(usage.budget, Money::from_cents(100000));
        assert_eq!(usage.spent, Money::from_cents(120000));
        assert_eq!(usage.remaining, Money::from_cents(-20000));
        assert_eq!(usage.percent, 100.0);
        assert!(usage.is_overspent());
    }

    #[test]
    fn test_partial_usage() {
        let txns = spending(&[25000]);
        let usage = evaluate_budget(&txns, Some(Money::from_cents(100000))).unwrap();
        assert_eq!(usage.remaining, Money::from_cents(75000));
        assert!((usage.percent - 25.0).abs() < 1e-9);
        assert!(!usage.is_overspent());
    }

    #[test]
    fn test_income_is_ignored() {
        let mut txns = spending(&[10000]);
        txns.push(Transaction::income(day(), Money::from_cents(900000)));
        let usage = evaluate_budget(&txns, Some(Money::from_cents(20000))).unwrap();
        assert_eq!(usage.spent, Money::from_cents(10000));
        assert!((usage.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_spending() {
        let usage = evaluate_budget(&[], Some(Money::from_cents(5000))).unwrap();
        assert_eq!(usage.spent, Money::zero());
        assert_eq!(usage.remaining, Money::from_cents(5000));
        assert_eq!(usage.percent, 0.0);
    }

    #[test]
    fn test_negative_budget_percent_is_clamped() {
        let txns = spending(&[1000]);
        let usage = evaluate_budget(&txns, Some(Money::from_cents(-5000))).unwrap();
        assert_eq!(usage.percent, 0.0);
        assert_eq!(usage.remaining, Money::from_cents(-6000));
    }
}
