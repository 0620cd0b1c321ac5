//! CLI command handlers for snapshot import
//!
//! The hosted store exports JSON arrays of records. Importing validates the
//! whole file and replaces the stored snapshot in one atomic write.

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::FinanceResult;
use crate::storage::Storage;

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Replace stored transactions with an exported JSON file
    #[command(alias = "txns")]
    Transactions {
        /// Path to the JSON export
        file: PathBuf,
    },

    /// Replace stored bills with an exported JSON file
    Bills {
        /// Path to the JSON export
        file: PathBuf,
    },
}

/// Handle import commands
pub fn handle_import_command(storage: &Storage, cmd: ImportCommands) -> FinanceResult<()> {
    match cmd {
        ImportCommands::Transactions { file } => {
            let count = storage.import_transactions(&file)?;
            println!(
                "Imported {} transaction(s) into {}",
                count,
                storage.paths().transactions_file().display()
            );
        }
        ImportCommands::Bills { file } => {
            let count = storage.import_bills(&file)?;
            println!(
                "Imported {} bill(s) into {}",
                count,
                storage.paths().bills_file().display()
            );
        }
    }
    Ok(())
}
