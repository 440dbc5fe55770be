//! CSV Export functionality
//!
//! Writes one month of transactions as a spreadsheet-friendly CSV and
//! manages the files kept in the exports directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{MonthKey, TransactionType};
use crate::storage::Storage;

/// Column header of a monthly export
pub const MONTH_EXPORT_HEADER: [&str; 6] = ["Date", "Month", "Description", "Amount", "Category", "Type"];

/// File name of a monthly export, e.g. `2025-06_transactions.csv`
///
/// A type filter is spelled into the name (`2025-06_debit_transactions.csv`)
/// so filtered exports don't overwrite the full one.
pub fn month_export_file_name(month: MonthKey, filter: Option<TransactionType>) -> String {
    match filter {
        Some(kind) => format!("{}_{}_transactions.csv", month, kind.to_string().to_lowercase()),
        None => format!("{}_transactions.csv", month),
    }
}

/// Write a month's transactions as CSV, returning the row count
pub fn export_month_csv<W: Write>(
    storage: &Storage,
    month: MonthKey,
    filter: Option<TransactionType>,
    writer: W,
) -> ExpenseResult<usize> {
    let mut transactions = storage.transactions.get_month(month)?;
    if let Some(kind) = filter {
        transactions.retain(|t| t.transaction_type == kind);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(MONTH_EXPORT_HEADER)?;

    let month_str = month.to_string();
    for txn in &transactions {
        csv_writer.write_record([
            txn.date.format("%Y-%m-%d").to_string().as_str(),
            month_str.as_str(),
            txn.description.as_str(),
            txn.amount.to_decimal_string().as_str(),
            txn.category.as_str(),
            txn.transaction_type.to_string().as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(transactions.len())
}

/// Export a month into the exports directory
///
/// Returns the written path and the number of rows. A month without any
/// matching transaction is an error and writes nothing.
pub fn export_month_to_file(
    storage: &Storage,
    month: MonthKey,
    filter: Option<TransactionType>,
) -> ExpenseResult<(PathBuf, usize)> {
    let exports_dir = storage.paths().exports_dir();
    fs::create_dir_all(&exports_dir)
        .map_err(|e| ExpenseError::Export(format!("Failed to create exports directory: {}", e)))?;

    let mut buffer = Vec::new();
    let count = export_month_csv(storage, month, filter, &mut buffer)?;
    if count == 0 {
        return Err(ExpenseError::Export(format!(
            "No transactions to export for {}",
            month
        )));
    }

    let path = exports_dir.join(month_export_file_name(month, filter));
    fs::write(&path, buffer)
        .map_err(|e| ExpenseError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    info!("exported {} row(s) to {}", count, path.display());
    Ok((path, count))
}

/// A CSV file in the exports directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Exported CSV files sorted by name
pub fn list_exports(paths: &ExpensePaths) -> ExpenseResult<Vec<ExportFile>> {
    let dir = paths.exports_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_csv(&path) {
            continue;
        }
        files.push(ExportFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: entry.metadata()?.len(),
            path,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Delete one exported file by name
///
/// Only bare `.csv` file names inside the exports directory are accepted.
pub fn delete_export(paths: &ExpensePaths, name: &str) -> ExpenseResult<PathBuf> {
    let name = name.trim();
    let candidate = Path::new(name);
    let is_bare = candidate.file_name().map(|n| n == candidate.as_os_str()).unwrap_or(false);
    if !is_bare || !is_csv(candidate) {
        return Err(ExpenseError::Validation(format!(
            "Not an export file name: '{}'",
            name
        )));
    }

    let path = paths.exports_dir().join(name);
    if !path.is_file() {
        return Err(ExpenseError::NotFound {
            entity_type: "Export file",
            identifier: name.to_string(),
        });
    }

    fs::remove_file(&path)?;
    info!("deleted export {}", path.display());
    Ok(path)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
