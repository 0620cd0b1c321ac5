//! Reports module for fintrack
//!
//! Terminal renderings of the aggregation results: period summaries,
//! rolling trends and annual overviews.

pub mod annual;
pub mod summary;
pub mod trend;

pub use annual::AnnualReport;
pub use summary::{format_budget_usage, scaled_budget, transactions_in, PeriodSummaryReport};
pub use trend::TrendReport;
