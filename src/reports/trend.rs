//! Trend Report
//!
//! A trailing series of monthly aggregates rendered as paired income and
//! expense bars, or exported as CSV.

use std::io::Write;

use serde::Serialize;

use crate::display::{format_bar, format_header, separator};
use crate::error::FinanceResult;
use crate::models::{Aggregate, MonthlyPoint, Transaction, YearMonth};
use crate::services::aggregate_rolling;

const BAR_WIDTH: usize = 24;

/// Rolling income/expense series ending at a month
#[derive(Debug, Clone)]
pub struct TrendReport {
    pub end: YearMonth,
    /// Oldest first
    pub points: Vec<MonthlyPoint>,
    pub total: Aggregate,
}

#[derive(Serialize)]
struct TrendCsvRow<'a> {
    month: String,
    label: &'a str,
    income: String,
    expense: String,
    balance: String,
}

impl TrendReport {
    pub fn generate(transactions: &[Transaction], end: YearMonth, window: usize) -> Self {
        let points = aggregate_rolling(transactions, end.month(), end.year(), window);
        let total = points.iter().map(|p| p.aggregate).sum();
        Self { end, points, total }
    }

    /// Average monthly balance over the window
    pub fn average_balance(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.total.balance.to_decimal() / self.points.len() as f64)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let width = 18 + 2 * (BAR_WIDTH + 14);

        output.push_str(&format_header(
            &format!("{}-month trend ending {}", self.points.len(), self.end),
            width,
        ));
        output.push('\n');
        output.push_str(&separator(width));
        output.push('\n');

        if self.points.is_empty() {
            output.push_str("No months in window.\n");
            return output;
        }

        let max = self
            .points
            .iter()
            .map(|p| p.income().max(p.expense()).to_decimal())
            .fold(0.0, f64::max);

        for point in &self.points {
            output.push_str(&format!(
                "{} {}  {} {:>12}  {} {:>12}\n",
                point.label,
                point.month.year(),
                format_bar(point.income().to_decimal(), max, BAR_WIDTH),
                point.income().format_with_symbol(symbol),
                format_bar(point.expense().to_decimal(), max, BAR_WIDTH),
                point.expense().format_with_symbol(symbol),
            ));
        }

        output.push_str(&separator(width));
        output.push('\n');
        output.push_str(&format!(
            "Income {}  Expense {}  Balance {}\n",
            self.total.income.format_with_symbol(symbol),
            self.total.expense.format_with_symbol(symbol),
            self.total.balance.format_with_symbol(symbol),
        ));
        if let Some(avg) = self.average_balance() {
            output.push_str(&format!("Average monthly balance: {}{:.2}\n", symbol, avg));
        }

        output
    }

    /// Export the series to CSV format, one row per month
    ///
    /// The header row is written even when the window is empty.
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(["month", "label", "income", "expense", "balance"])?;

        for point in &self.points {
            csv_writer.serialize(TrendCsvRow {
                month: point.month.to_string(),
                label: point.label,
                income: format!("{:.2}", point.income().to_decimal()),
                expense: format!("{:.2}", point.expense().to_decimal()),
                balance: format!("{:.2}", point.balance().to_decimal()),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
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

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(date(2024, 12, 1), Money::from_cents(300000)),
            Transaction::expense(date(2024, 12, 24), Money::from_cents(45000)),
            Transaction::income(date(2025, 1, 2), Money::from_cents(310000)),
            Transaction::expense(date(2025, 1, 5), Money::from_cents(12099)),
        ]
    }

    fn end() -> YearMonth {
        YearMonth::new(2025, 1).unwrap()
    }

    #[test]
    fn test_generate_trend() {
        let report = TrendReport::generate(&sample(), end(), 3);

        let months: Vec<String> = report.points.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, vec!["2024-11", "2024-12", "2025-01"]);
        assert_eq!(report.total.income, Money::from_cents(610000));
        assert_eq!(report.total.expense, Money::from_cents(57099));
    }

    #[test]
    fn test_format_terminal() {
        let output = TrendReport::generate(&sample(), end(), 3).format_terminal("$");
        assert!(output.contains("3-month trend ending 2025-01"));
        assert!(output.contains("Nov 2024"));
        assert!(output.contains("$3100.00"));
        assert!(output.contains("$120.99"));
    }

    #[test]
    fn test_empty_window() {
        let report = TrendReport::generate(&sample(), end(), 0);
        assert!(report.points.is_empty());
        assert_eq!(report.average_balance(), None);
        assert!(report.format_terminal("$").contains("No months in window."));

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "month,label,income,expense,balance\n");
    }

    #[test]
    fn test_export_csv() {
        let report = TrendReport::generate(&sample(), end(), 2);
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "month,label,income,expense,balance");
        assert_eq!(lines[1], "2024-12,Dec,3000.00,450.00,2550.00");
        assert_eq!(lines[2], "2025-01,Jan,3100.00,120.99,2979.01");
    }
}
