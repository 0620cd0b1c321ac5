//! User settings for fintrack
//!
//! Defaults for the aggregation windows, the optional monthly budget and
//! display preferences. Every field has a serde default so older or
//! hand-trimmed config files still load.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::error::FinanceError;
use crate::models::money::{self, Money};
use crate::models::PeriodKind;
use crate::services::{DEFAULT_LOOKAHEAD_DAYS, DEFAULT_ROLLING_WINDOW};
use crate::storage::file_io::write_json_atomic;

/// User settings for fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Length of the trend series, in months
    #[serde(default = "default_rolling_window")]
    pub rolling_window_months: usize,

    /// How far ahead to look for unpaid bills, in days
    #[serde(default = "default_lookahead")]
    pub bill_lookahead_days: u32,

    /// Monthly spending ceiling; `None` means no budget is set
    #[serde(default, with = "money::decimal_opt")]
    pub monthly_budget: Option<Money>,

    /// Period kind used when a command is given no explicit period
    #[serde(default)]
    pub default_period_kind: PeriodKind,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_rolling_window() -> usize {
    DEFAULT_ROLLING_WINDOW
}

fn default_lookahead() -> u32 {
    DEFAULT_LOOKAHEAD_DAYS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            rolling_window_months: default_rolling_window(),
            bill_lookahead_days: default_lookahead(),
            monthly_budget: None,
            default_period_kind: PeriodKind::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))?;
        validate_date_format(&settings.date_format)?;

        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

/// Reject a strftime pattern that cannot render a calendar date
///
/// Time-of-day specifiers such as `%H` count as invalid, since only dates
/// are ever formatted.
pub fn validate_date_format(date_format: &str) -> Result<(), FinanceError> {
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::MIN.format(date_format)).map_err(|_| {
        FinanceError::Config(format!("Invalid date format: {:?}", date_format))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.rolling_window_months, 12);
        assert_eq!(settings.bill_lookahead_days, 7);
        assert_eq!(settings.monthly_budget, None);
        assert_eq!(settings.default_period_kind, PeriodKind::Monthly);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.monthly_budget = Some(Money::from_cents(150000));
        settings.default_period_kind = PeriodKind::Quarterly;
        settings.currency_symbol = "€".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"monthly_budget": 1200}"#).unwrap();
        assert_eq!(settings.monthly_budget, Some(Money::from_cents(120000)));
        assert_eq!(settings.bill_lookahead_days, 7);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir_all(paths.base_dir()).unwrap();
        std::fs::write(paths.settings_file(), r#"{"date_format":"%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%d/%m/%Y").is_ok());
        assert!(validate_date_format("%b %e, %Y").is_ok());
        assert!(validate_date_format("%Q").is_err());
        assert!(validate_date_format("%H:%M").is_err());
    }

    #[test]
    fn test_format_money_uses_symbol() {
        let mut settings = Settings::default();
        settings.currency_symbol = "R$".into();
        assert_eq!(settings.format_money(Money::from_cents(-1050)), "-R$10.50");
    }
}
