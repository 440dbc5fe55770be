//! Service layer for the expense manager
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, categorization and persistence of every edit.

pub mod category;
pub mod dashboard;
pub mod import;
pub mod memory;
pub mod transaction;

pub use category::CategoryService;
pub use dashboard::{CategorySpending, DashboardService, ExpenseOverview};
pub use import::{parse_csv, parse_date, ImportResult, ImportService, ParsedBatch, SkippedRow};
pub use memory::MemoryService;
pub use transaction::{TransactionFilter, TransactionService};
