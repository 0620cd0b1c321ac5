//! fintrack - personal finance aggregation
//!
//! This library turns snapshots of transactions and bills into the numbers a
//! finance dashboard shows: period date ranges, monthly totals, rolling
//! trends, upcoming bills and budget usage.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Typed records and value types (money, months, periods)
//! - `services`: Pure aggregation functions over record slices
//! - `storage`: JSON snapshot files with validation at ingress
//! - `config`: Configuration and path management
//! - `reports` / `display`: Terminal formatting and CSV export
//! - `cli`: Command handlers for the `fintrack` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fintrack::models::{Money, PeriodSelection, Transaction};
//! use fintrack::services::{aggregate_month, resolve_period};
//!
//! let range = resolve_period(&PeriodSelection::quarterly(2025, 8));
//! assert_eq!(range.start(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
//!
//! let day = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
//! let txns = vec![Transaction::income(day, Money::from_cents(650000))];
//! assert_eq!(aggregate_month(&txns, 8, 2025).income, Money::from_cents(650000));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
