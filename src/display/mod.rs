//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and trees.

pub mod category;
pub mod dashboard;
pub mod import;
pub mod memory;
pub mod transaction;

pub use category::{format_category_tree, format_flat_categories};
pub use dashboard::{format_dashboard, format_dashboard_list, format_expense_overview, format_summary};
pub use import::format_import_result;
pub use memory::format_memory_table;
pub use transaction::{format_month_list, format_transaction_details, format_transaction_table};
