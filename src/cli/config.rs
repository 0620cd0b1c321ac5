//! CLI commands for viewing and changing settings

use clap::Subcommand;

use crate::config::settings::validate_date_format;
use crate::config::{FinTrackPaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, PeriodKind};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and current settings
    Show,

    /// Update one or more settings
    Set {
        /// Monthly budget (e.g. 1200 or 1,200.50)
        #[arg(long, value_parser = parse_money, conflicts_with = "no_budget")]
        budget: Option<Money>,

        /// Remove the monthly budget
        #[arg(long)]
        no_budget: bool,

        /// Months in the trend window
        #[arg(long)]
        window: Option<usize>,

        /// Days ahead to look for unpaid bills
        #[arg(long)]
        lookahead: Option<u32>,

        /// Currency symbol used in reports
        #[arg(long)]
        currency: Option<String>,

        /// Default period kind (monthly, quarterly, yearly)
        #[arg(long)]
        period_kind: Option<PeriodKind>,

        /// strftime pattern for dates in reports (e.g. %d/%m/%Y)
        #[arg(long)]
        date_format: Option<String>,
    },
}

/// Parse a money amount typed on the command line
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// Handle config commands
pub fn handle_config_command(
    paths: &FinTrackPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> FinanceResult<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", format_config(paths, settings));
            Ok(())
        }
        ConfigCommands::Set {
            budget,
            no_budget,
            window,
            lookahead,
            currency,
            period_kind,
            date_format,
        } => {
            if let Some(budget) = budget {
                if budget.is_negative() {
                    return Err(FinanceError::invalid_field("budget", "must not be negative"));
                }
                settings.monthly_budget = Some(budget);
            }
            if no_budget {
                settings.monthly_budget = None;
            }
            if let Some(window) = window {
                settings.rolling_window_months = window;
            }
            if let Some(lookahead) = lookahead {
                settings.bill_lookahead_days = lookahead;
            }
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(kind) = period_kind {
                settings.default_period_kind = kind;
            }
            if let Some(date_format) = date_format {
                validate_date_format(&date_format)?;
                settings.date_format = date_format;
            }

            settings.save(paths)?;
            tracing::info!(path = %paths.settings_file().display(), "settings saved");
            println!("Settings saved.");
            Ok(())
        }
    }
}

fn format_config(paths: &FinTrackPaths, settings: &Settings) -> String {
    let budget = settings
        .monthly_budget
        .map(|b| settings.format_money(b))
        .unwrap_or_else(|| "not set".to_string());

    let mut output = String::new();
    output.push_str("fintrack Configuration\n");
    output.push_str("======================\n");
    output.push_str(&format!("Base directory:    {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:     {}\n", paths.settings_file().display()));
    output.push_str(&format!("Transactions file: {}\n", paths.transactions_file().display()));
    output.push_str(&format!("Bills file:        {}\n", paths.bills_file().display()));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Monthly budget:      {}\n", budget));
    output.push_str(&format!("  Trend window:        {} months\n", settings.rolling_window_months));
    output.push_str(&format!("  Bill lookahead:      {} days\n", settings.bill_lookahead_days));
    output.push_str(&format!("  Default period kind: {}\n", settings.default_period_kind));
    output.push_str(&format!("  Currency symbol:     {}\n", settings.currency_symbol));
    output.push_str(&format!("  Date format:         {}\n", settings.date_format));
    output
}
