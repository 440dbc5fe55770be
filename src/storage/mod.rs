//! Storage layer
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each file is owned by one repository.

pub mod categories;
pub mod dashboard;
pub mod file_io;
pub mod init;
pub mod memory;
pub mod transactions;

pub use categories::CategoryRepository;
pub use dashboard::DashboardRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use memory::MemoryRepository;
pub use transactions::{InsertOutcome, MonthBuckets, TransactionRepository};

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExpensePaths,
    pub categories: CategoryRepository,
    pub memory: MemoryRepository,
    pub transactions: TransactionRepository,
    pub dashboards: DashboardRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.category_structure_file()),
            memory: MemoryRepository::new(paths.category_map_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            dashboards: DashboardRepository::new(paths.dashboard_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.categories.load()?;
        self.memory.load()?;
        self.transactions.load()?;
        self.dashboards.load()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        !init::needs_initialization(&self.paths)
    }
}
