//! Core data models
//!
//! Transactions, the category taxonomy, the learned category memory and the
//! monthly dashboard, plus the small value types they are built from.

pub mod category;
pub mod dashboard;
pub mod ids;
pub mod memory;
pub mod money;
pub mod month;
pub mod transaction;

pub use category::{parse_subcategory_list, CategoryError, CategoryGroup, CategoryStructure};
pub use dashboard::{DashboardSummary, MonthDashboard};
pub use ids::TransactionId;
pub use memory::CategoryMemory;
pub use money::{Money, MoneyParseError, MAX_PARSED_CENTS};
pub use month::{MonthKey, MonthParseError};
pub use transaction::{Transaction, TransactionType};
