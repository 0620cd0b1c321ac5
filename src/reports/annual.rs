//! Annual Report
//!
//! Month-by-month income, expense and balance for one calendar year.

use crate::display::{double_separator, format_bar, separator};
use crate::models::{AnnualSummary, Transaction};
use crate::services::aggregate_year;

const WIDTH: usize = 72;

#[derive(Debug, Clone)]
pub struct AnnualReport {
    pub summary: AnnualSummary,
}

impl AnnualReport {
    pub fn generate(transactions: &[Transaction], year: i32) -> Self {
        Self {
            summary: aggregate_year(transactions, year),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let summary = &self.summary;
        let mut output = String::new();

        output.push_str(&format!("Annual Summary {}\n", summary.year));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<6} {:>13} {:>13} {:>13}  {}\n",
            "Month", "Income", "Expense", "Balance", "Spending"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        let max_expense = summary
            .peak_expense_month()
            .map(|p| p.expense().to_decimal())
            .unwrap_or(0.0);

        for point in &summary.months {
            output.push_str(&format!(
                "{:<6} {:>13} {:>13} {:>13}  {}\n",
                point.label,
                point.income().format_with_symbol(symbol),
                point.expense().format_with_symbol(symbol),
                point.balance().format_with_symbol(symbol),
                format_bar(point.expense().to_decimal(), max_expense, 16),
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<6} {:>13} {:>13} {:>13}\n",
            "Total",
            summary.total.income.format_with_symbol(symbol),
            summary.total.expense.format_with_symbol(symbol),
            summary.total.balance.format_with_symbol(symbol),
        ));

        if let Some(peak) = summary.peak_expense_month() {
            output.push_str(&format!(
                "\nHighest spending: {} ({})\n",
                peak.month,
                peak.expense().format_with_symbol(symbol)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_annual_report() {
        let txns = vec![
            Transaction::income(date(2025, 3, 1), Money::from_cents(500000)),
            Transaction::expense(date(2025, 3, 9), Money::from_cents(20000)),
            Transaction::expense(date(2025, 11, 9), Money::from_cents(90000)),
            Transaction::expense(date(2024, 11, 9), Money::from_cents(77700)),
        ];

        let report = AnnualReport::generate(&txns, 2025);
        assert_eq!(report.summary.months.len(), 12);
        assert_eq!(report.summary.total.expense, Money::from_cents(110000));

        let output = report.format_terminal("$");
        assert!(output.contains("Annual Summary 2025"));
        assert!(output.contains("Highest spending: 2025-11 ($900.00)"));
        assert!(!output.contains("$777.00"));
    }

    #[test]
    fn test_empty_year_has_no_peak() {
        let report = AnnualReport::generate(&[], 2025);
        let output = report.format_terminal("$");
        assert!(output.contains("Dec"));
        assert!(!output.contains("Highest spending"));
    }
}
