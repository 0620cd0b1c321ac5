//! Period Summary Report
//!
//! Income, expense, category breakdown and budget usage for one resolved
//! period. Transactions are selected by date, so the same report works for
//! monthly, quarterly, yearly and custom periods.

use crate::display::{format_bar, format_percentage, separator};
use crate::models::{
    Aggregate, BudgetUsage, CategoryTotal, DateRange, Money, PeriodMode, PeriodSelection,
    Transaction,
};
use crate::services::{aggregate_range, evaluate_budget, resolve_period, spending_by_category};

const WIDTH: usize = 64;

/// Summary of a single period
#[derive(Debug, Clone)]
pub struct PeriodSummaryReport {
    pub selection: PeriodSelection,
    pub range: DateRange,
    pub aggregate: Aggregate,
    pub categories: Vec<CategoryTotal>,
    /// Absent when no budget is configured
    pub budget: Option<BudgetUsage>,
    pub transaction_count: usize,
}

/// Number of monthly budgets a period spans
///
/// Custom ranges are compared against a single monthly budget.
pub fn budget_months(mode: &PeriodMode) -> i64 {
    match mode {
        PeriodMode::Monthly | PeriodMode::Custom(_) => 1,
        PeriodMode::Quarterly => 3,
        PeriodMode::Yearly => 12,
    }
}

/// Scale a monthly budget to the length of the selected period
pub fn scaled_budget(monthly_budget: Option<Money>, selection: &PeriodSelection) -> Option<Money> {
    monthly_budget.map(|b| Money::from_cents(b.cents().saturating_mul(budget_months(&selection.mode))))
}

/// Transactions dated inside `range`
pub fn transactions_in(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| range.contains(t.date))
        .cloned()
        .collect()
}

impl PeriodSummaryReport {
    /// Build the summary; `monthly_budget` is scaled to the period length
    pub fn generate(
        transactions: &[Transaction],
        selection: &PeriodSelection,
        monthly_budget: Option<Money>,
    ) -> Self {
        let range = resolve_period(selection);
        let in_period = transactions_in(transactions, &range);

        Self {
            selection: *selection,
            range,
            aggregate: aggregate_range(&in_period, &range),
            categories: spending_by_category(&in_period, &range),
            budget: evaluate_budget(&in_period, scaled_budget(monthly_budget, selection)),
            transaction_count: in_period.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Summary for {} ({} to {})\n",
            self.selection,
            self.range.start(),
            self.range.end()
        ));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>14}\n", "Income", money(self.aggregate.income)));
        output.push_str(&format!("{:<20} {:>14}\n", "Expense", money(self.aggregate.expense)));
        output.push_str(&format!("{:<20} {:>14}\n", "Balance", money(self.aggregate.balance)));
        output.push_str(&format!("{:<20} {:>14}\n", "Transactions", self.transaction_count));

        if let Some(usage) = &self.budget {
            output.push('\n');
            output.push_str(&format_budget_usage(usage, symbol));
        }

        if !self.categories.is_empty() {
            output.push('\n');
            output.push_str(&format!(
                "{:<28} {:>12} {:>6} {:>7}\n",
                "Category", "Spent", "Count", "%"
            ));
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for row in &self.categories {
                output.push_str(&format!(
                    "{:<28} {:>12} {:>6} {:>7}\n",
                    crate::display::truncate(&row.category, 28),
                    money(row.total),
                    row.transaction_count,
                    format_percentage(row.percentage)
                ));
            }
        }

        output
    }
}

/// Budget lines shared by the summary and budget commands
pub fn format_budget_usage(usage: &BudgetUsage, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Budget",
        usage.budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Spent",
        usage.spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Remaining",
        usage.remaining.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "[{}] {}",
        format_bar(usage.percent, 100.0, 30),
        format_percentage(usage.percent)
    ));
    if usage.is_overspent() {
        output.push_str("  OVER BUDGET");
    }
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(date(8, 1), Money::from_cents(650000)).with_category("Salary"),
            Transaction::expense(date(8, 2), Money::from_cents(18050)).with_category("Food"),
            Transaction::expense(date(7, 20), Money::from_cents(5000)).with_category("Fun"),
            Transaction::expense(date(9, 3), Money::from_cents(2000)),
        ]
    }

    #[test]
    fn test_monthly_summary() {
        let selection = PeriodSelection::monthly(2025, 8);
        let report = PeriodSummaryReport::generate(&sample(), &selection, None);

        assert_eq!(report.aggregate.income, Money::from_cents(650000));
        assert_eq!(report.aggregate.expense, Money::from_cents(18050));
        assert_eq!(report.aggregate.balance, Money::from_cents(631950));
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.categories.len(), 1);
        assert!(report.budget.is_none());
    }

    #[test]
    fn test_quarterly_summary_scales_budget() {
        let selection = PeriodSelection::quarterly(2025, 8);
        let report =
            PeriodSummaryReport::generate(&sample(), &selection, Some(Money::from_cents(10000)));

        assert_eq!(report.range.start(), date(7, 1));
        assert_eq!(report.range.end(), date(9, 30));
        assert_eq!(report.aggregate.expense, Money::from_cents(25050));

        let usage = report.budget.unwrap();
        assert_eq!(usage.budget, Money::from_cents(30000));
        assert_eq!(usage.remaining, Money::from_cents(4950));
    }

    #[test]
    fn test_format_terminal() {
        let selection = PeriodSelection::monthly(2025, 8);
        let report =
            PeriodSummaryReport::generate(&sample(), &selection, Some(Money::from_cents(10000)));
        let output = report.format_terminal("$");

        assert!(output.contains("Summary for 2025-08"));
        assert!(output.contains("$6500.00"));
        assert!(output.contains("$6319.50"));
        assert!(output.contains("Food"));
        assert!(output.contains("OVER BUDGET"));
        assert!(output.contains("-$80.50"));
    }

    #[test]
    fn test_budget_months() {
        assert_eq!(budget_months(&PeriodMode::Yearly), 12);
        assert_eq!(scaled_budget(None, &PeriodSelection::yearly(2025)), None);
    }
}
