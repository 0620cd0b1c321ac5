//! Bill display formatting

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Bill;

#[derive(Tabled)]
struct BillRow {
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "In")]
    when: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn relative_day(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "1 day ago".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("{} days", d),
    }
}

/// Render a due date, falling back to ISO 8601 when the pattern is unusable
fn format_due(date: NaiveDate, date_format: &str) -> String {
    let mut due = String::new();
    match write!(due, "{}", date.format(date_format)) {
        Ok(()) => due,
        Err(_) => date.to_string(),
    }
}

/// Format bills as a table, with due dates shown relative to `today`
pub fn format_bill_table(bills: &[&Bill], today: NaiveDate, symbol: &str, date_format: &str) -> String {
    if bills.is_empty() {
        return "No bills found.".to_string();
    }

    let rows = bills.iter().map(|bill| BillRow {
        due: format_due(bill.due_date, date_format),
        when: relative_day(bill.days_until_due(today)),
        description: truncate(&bill.description, 40),
        amount: bill.amount.format_with_symbol(symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
