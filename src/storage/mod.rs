//! Snapshot storage for fintrack
//!
//! The hosted store owns transactions and bills. This layer keeps the most
//! recent export of each as a JSON file in the data directory and hands the
//! aggregation core a complete, validated snapshot. Records are checked on
//! the way in (see [`crate::models::TransactionRecord`]), so a snapshot that
//! loads is one the core can trust.

pub mod file_io;

use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

pub use file_io::{read_json, read_json_required, write_json_atomic};

use crate::config::paths::FinTrackPaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Bill, Transaction};

/// Everything the aggregation core reads, loaded at one point in time
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub bills: Vec<Bill>,
}

/// Reads and replaces the snapshot files under the data directory
pub struct Storage {
    paths: FinTrackPaths,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: FinTrackPaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &FinTrackPaths {
        &self.paths
    }

    /// Load the stored transactions; a missing file means none yet
    pub fn load_transactions(&self) -> FinanceResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> = read_json(self.paths.transactions_file())?;
        tracing::info!(count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }

    /// Load the stored bills; a missing file means none yet
    pub fn load_bills(&self) -> FinanceResult<Vec<Bill>> {
        let bills: Vec<Bill> = read_json(self.paths.bills_file())?;
        tracing::info!(count = bills.len(), "loaded bills");
        Ok(bills)
    }

    /// Load transactions and bills together
    pub fn load_snapshot(&self) -> FinanceResult<Snapshot> {
        Ok(Snapshot {
            transactions: self.load_transactions()?,
            bills: self.load_bills()?,
        })
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> FinanceResult<()> {
        write_json_atomic(self.paths.transactions_file(), transactions)
    }

    pub fn save_bills(&self, bills: &[Bill]) -> FinanceResult<()> {
        write_json_atomic(self.paths.bills_file(), bills)
    }

    /// Validate an exported transaction file and replace the stored snapshot
    ///
    /// Nothing is written unless every record validates. Returns the number
    /// of records imported.
    pub fn import_transactions(&self, source: &Path) -> FinanceResult<usize> {
        let transactions: Vec<Transaction> = read_json_required(source)?;
        ensure_unique_ids(transactions.iter().map(|t| t.id), "transaction")?;
        self.save_transactions(&transactions)?;
        tracing::info!(source = %source.display(), count = transactions.len(), "imported transactions");
        Ok(transactions.len())
    }

    /// Validate an exported bill file and replace the stored snapshot
    pub fn import_bills(&self, source: &Path) -> FinanceResult<usize> {
        let bills: Vec<Bill> = read_json_required(source)?;
        ensure_unique_ids(bills.iter().map(|b| b.id), "bill")?;
        self.save_bills(&bills)?;
        tracing::info!(source = %source.display(), count = bills.len(), "imported bills");
        Ok(bills.len())
    }
}

fn ensure_unique_ids<I, T>(ids: I, entity: &str) -> FinanceResult<()>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(FinanceError::Validation(format!(
                "duplicate {} id: {}",
                entity, id
            )));
        }
        seen.insert(id);
    }
    Ok(())
}
