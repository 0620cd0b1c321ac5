//! Bill model
//!
//! A bill is a known future payment. Like transactions, bills are validated
//! on deserialization through [`BillRecord`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BillId;
use super::money::Money;
use crate::error::FinanceError;

/// A validated bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BillRecord", into = "BillRecord")]
pub struct Bill {
    pub id: BillId,
    pub description: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub paid: bool,
}

impl Bill {
    /// Create an unpaid bill
    pub fn new(description: impl Into<String>, amount: Money, due_date: NaiveDate) -> Self {
        Self {
            id: BillId::new(),
            description: description.into(),
            amount,
            due_date,
            paid: false,
        }
    }

    /// Builder-style paid flag setter
    pub fn with_paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    /// Days from `today` until the bill is due (negative when overdue)
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.due_date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            if self.paid { " (paid)" } else { "" }
        )
    }
}

/// Row shape returned by the hosted store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRecord {
    pub id: BillId,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    /// The store leaves this null on bills nobody has touched yet
    #[serde(default)]
    pub paid: Option<bool>,
}

impl TryFrom<BillRecord> for Bill {
    type Error = FinanceError;

    fn try_from(record: BillRecord) -> Result<Self, Self::Error> {
        let amount = Money::from_decimal(record.amount).ok_or_else(|| {
            FinanceError::invalid_field(
                "amount",
                format!("not a finite amount within range (bill {})", record.id),
            )
        })?;

        Ok(Self {
            id: record.id,
            description: record.description,
            amount,
            due_date: record.due_date,
            paid: record.paid.unwrap_or(false),
        })
    }
}

impl From<Bill> for BillRecord {
    fn from(bill: Bill) -> Self {
        Self {
            id: bill.id,
            description: bill.description,
            amount: bill.amount.to_decimal(),
            due_date: bill.due_date,
            paid: Some(bill.paid),
        }
    }
}
