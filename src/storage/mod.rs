//! Storage layer for pocket-ledger
//!
//! JSON file storage with atomic writes and observable repositories for
//! expenses and the monthly budget.

pub mod budget;
pub mod expenses;
pub mod file_io;
pub mod observable;

pub use budget::{budget_from_input, BudgetStore};
pub use expenses::{ExpenseSnapshot, ExpenseStore};
pub use file_io::{read_json, write_json_atomic};
pub use observable::{Subscribers, Subscription};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub expenses: ExpenseStore,
    pub budget: BudgetStore,
}

impl Storage {
    /// Create directories and load both repositories from disk
    pub fn open(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseStore::open(paths.expenses_file())?,
            budget: BudgetStore::open(paths.budget_file())?,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Reload all data from disk
    pub fn load_all(&self) -> Result<(), LedgerError> {
        self.expenses.load()?;
        self.budget.load()?;
        Ok(())
    }
}
