//! CLI commands for reports
//!
//! Every command reads the stored snapshot, runs the aggregation services
//! and prints a terminal report. `today` is passed in by the caller so the
//! handlers never read the clock themselves.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use super::config::parse_money;
use crate::config::Settings;
use crate::display::format_bill_table;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, PeriodSelection, YearMonth};
use crate::reports::{
    format_budget_usage, scaled_budget, transactions_in, AnnualReport, PeriodSummaryReport,
    TrendReport,
};
use crate::services::{
    aggregate_month, evaluate_budget, overdue_bills_as_of, resolve_period, upcoming_bills_as_of,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the date range a period resolves to
    Period {
        /// Period: 2025-08, 2025-Q3, 2025 or 2025-01-01..2025-03-31
        period: Option<PeriodSelection>,
    },

    /// Income, expense and balance for one month
    Month {
        /// Month number (1-12); defaults to the current month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Four-digit year; defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Totals, category breakdown and budget usage for a period
    Summary {
        /// Period: 2025-08, 2025-Q3, 2025 or 2025-01-01..2025-03-31
        #[arg(short, long)]
        period: Option<PeriodSelection>,
    },

    /// Rolling monthly income and expense
    Trend {
        /// Last month of the series (YYYY-MM); defaults to the current month
        #[arg(short, long, value_parser = parse_year_month)]
        end: Option<YearMonth>,

        /// Number of months in the series
        #[arg(short, long)]
        window: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-by-month overview of a calendar year
    #[command(alias = "annual")]
    Year {
        /// Four-digit year; defaults to the current year
        year: Option<i32>,
    },

    /// Unpaid bills due soon
    Bills {
        /// Days ahead to look
        #[arg(short, long)]
        days: Option<u32>,

        /// Also list unpaid bills already past due
        #[arg(long)]
        overdue: bool,
    },

    /// Spending against the monthly budget
    Budget {
        /// Period: 2025-08, 2025-Q3, 2025 or 2025-01-01..2025-03-31
        #[arg(short, long)]
        period: Option<PeriodSelection>,

        /// Budget amount to use instead of the configured one
        #[arg(short, long, value_parser = parse_money)]
        amount: Option<Money>,
    },
}

/// Parse a `YYYY-MM` month key typed on the command line
pub fn parse_year_month(s: &str) -> Result<YearMonth, String> {
    YearMonth::parse(s).map_err(|e| e.to_string())
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    let current = |period: Option<PeriodSelection>| {
        period.unwrap_or_else(|| PeriodSelection::current(settings.default_period_kind, today))
    };

    match cmd {
        ReportCommands::Period { period } => {
            print!("{}", format_period(&current(period)));
        }
        ReportCommands::Month { month, year } => {
            let month = month.unwrap_or_else(|| today.month());
            let year = year.unwrap_or_else(|| today.year());
            let key = YearMonth::new(year, month)?;

            let transactions = storage.load_transactions()?;
            let aggregate = aggregate_month(&transactions, month, year);

            let symbol = &settings.currency_symbol;
            println!("{} {}", key.short_name(), key.year());
            println!("{:<10} {:>14}", "Income", aggregate.income.format_with_symbol(symbol));
            println!("{:<10} {:>14}", "Expense", aggregate.expense.format_with_symbol(symbol));
            println!("{:<10} {:>14}", "Balance", aggregate.balance.format_with_symbol(symbol));
        }
        ReportCommands::Summary { period } => {
            let transactions = storage.load_transactions()?;
            let report =
                PeriodSummaryReport::generate(&transactions, &current(period), settings.monthly_budget);
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
        ReportCommands::Trend {
            end,
            window,
            output,
        } => {
            let end = end.unwrap_or_else(|| YearMonth::from_date(today));
            let window = window.unwrap_or(settings.rolling_window_months);

            let transactions = storage.load_transactions()?;
            let report = TrendReport::generate(&transactions, end, window);

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Trend exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
        }
        ReportCommands::Year { year } => {
            let year = year.unwrap_or_else(|| today.year());
            YearMonth::new(year, 1)?;

            let transactions = storage.load_transactions()?;
            let report = AnnualReport::generate(&transactions, year);
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
        ReportCommands::Bills { days, overdue } => {
            let days = days.unwrap_or(settings.bill_lookahead_days);
            let bills = storage.load_bills()?;
            let symbol = &settings.currency_symbol;

            if overdue {
                println!("Overdue");
                println!(
                    "{}",
                    format_bill_table(&overdue_bills_as_of(&bills, today), today, symbol, &settings.date_format)
                );
                println!();
            }

            println!("Due in the next {} day(s)", days);
            println!(
                "{}",
                format_bill_table(
                    &upcoming_bills_as_of(&bills, days, today),
                    today,
                    symbol,
                    &settings.date_format
                )
            );
        }
        ReportCommands::Budget { period, amount } => {
            let selection = current(period);
            let budget = scaled_budget(amount.or(settings.monthly_budget), &selection);

            let range = resolve_period(&selection);
            let transactions = storage.load_transactions()?;
            let in_period = transactions_in(&transactions, &range);

            match evaluate_budget(&in_period, budget) {
                Some(usage) => {
                    println!("Budget for {}", selection);
                    print!("{}", format_budget_usage(&usage, &settings.currency_symbol));
                }
                None => {
                    println!("No budget set. Use 'fintrack config set --budget AMOUNT' or pass --amount.");
                }
            }
        }
    }

    Ok(())
}

fn format_period(selection: &PeriodSelection) -> String {
    let range = resolve_period(selection);
    format!(
        "{}: {} to {} ({} days)\nPrevious: {}  Next: {}\n",
        selection,
        range.start(),
        range.end(),
        range.num_days(),
        selection.prev(),
        selection.next()
    )
}
