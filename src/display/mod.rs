//! Display formatting for terminal output
//!
//! Small helpers for bars, separators and percentages, plus the bill table.

pub mod bill;
pub mod report;

pub use bill::format_bill_table;
pub use report::{
    double_separator, format_bar, format_header, format_percentage, separator, truncate,
};
