//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod dashboard;
pub mod export;
pub mod import;
pub mod memory;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use dashboard::{handle_dashboard_command, DashboardCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportArgs};
pub use memory::{handle_memory_command, MemoryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, MonthKey};
use crate::storage::Storage;

/// The month a command works on when none was given
///
/// Defaults to the newest month with transactions, or the current month.
pub(crate) fn resolve_month(storage: &Storage, month: Option<MonthKey>) -> ExpenseResult<MonthKey> {
    if let Some(month) = month {
        return Ok(month);
    }
    Ok(storage
        .transactions
        .months()?
        .first()
        .copied()
        .unwrap_or_else(MonthKey::current))
}

pub(crate) fn parse_amount(input: &str) -> ExpenseResult<Money> {
    Money::parse(input).map_err(|e| ExpenseError::Validation(format!("Invalid amount: {}", e)))
}
