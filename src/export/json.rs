//! JSON Export functionality
//!
//! Exports every stored file in one document with schema versioning.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryMemory, CategoryStructure, MonthDashboard, MonthKey};
use crate::storage::{MonthBuckets, Storage};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Parent -> subcategory taxonomy
    pub categories: CategoryStructure,

    /// Learned description -> category memory
    pub memory: CategoryMemory,

    /// Transactions by month
    pub transactions: MonthBuckets,

    /// Dashboards by month
    pub dashboards: BTreeMap<MonthKey, MonthDashboard>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub month_count: usize,
    pub category_count: usize,
    pub memory_count: usize,
    pub dashboard_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        let categories = storage.categories.get()?;
        let memory = storage.memory.get()?;
        let transactions = storage.transactions.all()?;
        let dashboards = storage.dashboards.all()?;

        let dates = || transactions.values().flatten().map(|t| t.date);
        let metadata = ExportMetadata {
            transaction_count: transactions.values().map(Vec::len).sum(),
            month_count: transactions.len(),
            category_count: categories.flat().len(),
            memory_count: memory.len(),
            dashboard_count: dashboards.len(),
            earliest_transaction: dates().min().map(|d| d.to_string()),
            latest_transaction: dates().max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            memory,
            transactions,
            dashboards,
            metadata,
        })
    }
}

/// Export all data to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Money, Transaction, TransactionType};
    use crate::storage::initialize_storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .transactions
            .insert_new(vec![
                Transaction::new(
                    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                    "NETFLIX",
                    Money::from_cents(1_699),
                    "Subscriptions",
                    TransactionType::Debit,
                ),
                Transaction::new(
                    NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
                    "RENT",
                    Money::from_cents(150_000),
                    "Rent",
                    TransactionType::Debit,
                ),
            ])
            .unwrap();
        storage.memory.update(|m| m.set("netflix", "Subscriptions")).unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.month_count, 2);
        assert_eq!(export.metadata.memory_count, 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-15"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-02-02"));
    }

    #[test]
    fn test_json_document_shape() {
        let (_temp_dir, storage) = create_test_storage();

        let mut out = Vec::new();
        export_full_json(&storage, &mut out, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["categories"]["Living"][0], "Rent");
        assert!(value["transactions"].as_object().unwrap().is_empty());
    }
}
