//! Core data models for fintrack
//!
//! Records fetched from the hosted store (transactions, bills), the value
//! types they are built from, and the derived aggregates the services return.

pub mod aggregate;
pub mod bill;
pub mod ids;
pub mod money;
pub mod month;
pub mod period;
pub mod transaction;

pub use aggregate::{Aggregate, AnnualSummary, BudgetUsage, CategoryTotal, MonthlyPoint};
pub use bill::{Bill, BillRecord};
pub use ids::{BillId, TransactionId};
pub use money::Money;
pub use month::YearMonth;
pub use period::{DateRange, PeriodKind, PeriodMode, PeriodParseError, PeriodSelection};
pub use transaction::{Transaction, TransactionRecord, TransactionType};
