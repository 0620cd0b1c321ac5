//! Derived values produced by the aggregation services
//!
//! Nothing here is stored; every value is recomputed from a snapshot of
//! records on each call.

use serde::Serialize;

use super::money::Money;
use super::month::YearMonth;
use super::transaction::{Transaction, TransactionType};

/// Income, expense and their difference for some period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Aggregate {
    pub income: Money,
    pub expense: Money,
    /// Always `income - expense`
    pub balance: Money,
}

impl Aggregate {
    pub fn new(income: Money, expense: Money) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum a set of transactions
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::zero(), |acc, txn| acc.with(txn))
    }

    /// This aggregate with one more transaction counted
    pub fn with(self, txn: &Transaction) -> Self {
        match txn.kind {
            TransactionType::Income => Self::new(self.income + txn.value, self.expense),
            TransactionType::Expense => Self::new(self.income, self.expense + txn.value),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.income.is_zero() && self.expense.is_zero()
    }
}

impl std::ops::Add for Aggregate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.income + other.income, self.expense + other.expense)
    }
}

impl std::iter::Sum for Aggregate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, a| acc + a)
    }
}

/// One month of a rolling series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// Short month name for chart axes ("Jan", "Feb", ...)
    pub label: &'static str,
    pub month: YearMonth,
    #[serde(flatten)]
    pub aggregate: Aggregate,
}

impl MonthlyPoint {
    pub fn new(month: YearMonth, aggregate: Aggregate) -> Self {
        Self {
            label: month.short_name(),
            month,
            aggregate,
        }
    }

    pub fn income(&self) -> Money {
        self.aggregate.income
    }

    pub fn expense(&self) -> Money {
        self.aggregate.expense
    }

    pub fn balance(&self) -> Money {
        self.aggregate.balance
    }
}

/// Twelve months of a calendar year plus their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualSummary {
    pub year: i32,
    /// January through December
    pub months: Vec<MonthlyPoint>,
    pub total: Aggregate,
}

impl AnnualSummary {
    /// Month with the highest expense, if any month had spending
    pub fn peak_expense_month(&self) -> Option<&MonthlyPoint> {
        self.months
            .iter()
            .filter(|p| p.expense().is_positive())
            .max_by_key(|p| p.expense())
    }
}

/// Spending in one category within a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of all spending in the period, 0-100
    pub percentage: f64,
}

/// Budget ceiling compared against spending
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub budget: Money,
    pub spent: Money,
    /// `budget - spent`; negative when overspent
    pub remaining: Money,
    /// Display percentage, capped to 0-100
    pub percent: f64,
}

impl BudgetUsage {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}
