//! Transaction model
//!
//! Transactions arrive from the hosted store as loosely-typed rows. They are
//! validated once, on deserialization, through [`TransactionRecord`]; past that
//! point the aggregation code can rely on the invariants below without
//! checking them again.
//!
//! - `value` is a non-negative magnitude; direction lives in `kind`
//! - `month` is a valid `"YYYY-MM"` key

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::month::YearMonth;
use crate::error::FinanceError;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A validated financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    pub id: TransactionId,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    pub description: String,

    /// Non-negative magnitude
    pub value: Money,

    pub kind: TransactionType,

    pub category: String,

    /// Month key the transaction is booked under
    pub month: YearMonth,

    pub year: i32,
}

impl Transaction {
    /// Create a transaction booked in the month of its date
    ///
    /// Negative values are folded to their magnitude.
    pub fn new(date: NaiveDate, value: Money, kind: TransactionType) -> Self {
        let month = YearMonth::from_date(date);
        Self {
            id: TransactionId::new(),
            date,
            description: String::new(),
            value: value.abs(),
            kind,
            category: String::new(),
            year: month.year(),
            month,
        }
    }

    pub fn income(date: NaiveDate, value: Money) -> Self {
        Self::new(date, value, TransactionType::Income)
    }

    pub fn expense(date: NaiveDate, value: Money) -> Self {
        Self::new(date, value, TransactionType::Expense)
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style category setter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Book the transaction under a month other than its date's
    pub fn booked_in(mut self, month: YearMonth) -> Self {
        self.month = month;
        self.year = month.year();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "+" };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            sign,
            self.value
        )
    }
}

/// Row shape returned by the hosted store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = FinanceError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let value = Money::from_decimal(record.value)
            .ok_or_else(|| {
                FinanceError::invalid_field(
                    "value",
                    format!("not a finite amount within range (transaction {})", record.id),
                )
            })?;
        if value.is_negative() {
            return Err(FinanceError::invalid_field(
                "value",
                format!("must not be negative (transaction {})", record.id),
            ));
        }

        let month = match record.month.as_deref() {
            Some(key) => YearMonth::parse(key).map_err(|e| FinanceError::invalid_field("month", e))?,
            None => YearMonth::from_date(record.date),
        };

        let year = match record.year.as_deref() {
            Some(y) => y
                .trim()
                .parse::<i32>()
                .map_err(|_| FinanceError::invalid_field("year", format!("not a year: {}", y)))?,
            None => month.year(),
        };
        if year != month.year() {
            tracing::warn!(
                id = %record.id,
                year,
                month = %month,
                "transaction year disagrees with its month key; month key wins"
            );
        }
        if month.year() != record.date.year() || month.month() != record.date.month() {
            tracing::debug!(id = %record.id, date = %record.date, month = %month, "transaction booked outside its date's month");
        }

        Ok(Self {
            id: record.id,
            date: record.date,
            description: record.description,
            value,
            kind: record.kind,
            category: record.category,
            month,
            year,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            date: txn.date,
            description: txn.description,
            value: txn.value.to_decimal(),
            kind: txn.kind,
            category: txn.category,
            month: Some(txn.month.to_string()),
            year: Some(format!("{:04}", txn.year)),
        }
    }
}
