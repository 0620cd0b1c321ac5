//! Service layer for fintrack
//!
//! The pure aggregation core: period resolution, monthly and rolling
//! aggregation, bill filtering and budget evaluation. Nothing here performs
//! I/O or holds state; callers pass fully-loaded snapshots in.

pub mod aggregation;
pub mod bills;
pub mod budget;
pub mod period;

pub use aggregation::{
    aggregate_month, aggregate_range, aggregate_rolling, aggregate_year, spending_by_category,
    DEFAULT_ROLLING_WINDOW,
};
pub use bills::{overdue_bills_as_of, upcoming_bills, upcoming_bills_as_of, DEFAULT_LOOKAHEAD_DAYS};
pub use budget::evaluate_budget;
pub use period::{resolve_current, resolve_period};
