//! Transaction repository for JSON storage
//!
//! Manages loading and saving month-bucketed transactions to
//! transactions.json, laid out as `{ "YYYY-MM": [transaction, ...] }`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::RwLock;

use log::debug;

use crate::error::ExpenseError;
use crate::models::{MonthKey, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// All month buckets
pub type MonthBuckets = BTreeMap<MonthKey, Vec<Transaction>>;

/// Outcome of inserting a batch with duplicate detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Transactions that were stored
    pub inserted: Vec<Transaction>,
    /// Transactions skipped because the same bank row was already stored
    pub duplicates: Vec<Transaction>,
}

/// Repository for month-bucketed transactions
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<MonthBuckets>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let mut file_data: MonthBuckets = read_json(&self.path)?;
        file_data.retain(|_, txns| !txns.is_empty());

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Every month bucket
    pub fn all(&self) -> Result<MonthBuckets, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Month keys, newest first
    pub fn months(&self) -> Result<Vec<MonthKey>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.keys().rev().copied().collect())
    }

    /// Distinct years that have data, newest first
    pub fn years(&self) -> Result<Vec<i32>, ExpenseError> {
        let years: BTreeSet<i32> = self.months()?.iter().map(|m| m.year()).collect();
        Ok(years.into_iter().rev().collect())
    }

    /// Month keys within a year, newest first
    pub fn months_in_year(&self, year: i32) -> Result<Vec<MonthKey>, ExpenseError> {
        Ok(self
            .months()?
            .into_iter()
            .filter(|m| m.year() == year)
            .collect())
    }

    /// Transactions of one month, sorted by date (empty if the month is absent)
    pub fn get_month(&self, month: MonthKey) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let mut txns = data.get(&month).cloned().unwrap_or_default();
        txns.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(txns)
    }

    /// Replace one month's transactions; an empty list removes the bucket
    pub fn set_month(&self, month: MonthKey, records: Vec<Transaction>) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        if records.is_empty() {
            data.remove(&month);
        } else {
            data.insert(month, records);
        }
        Ok(())
    }

    /// Remove a month bucket, returning how many transactions it held
    pub fn remove_month(&self, month: MonthKey) -> Result<usize, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&month).map(|txns| txns.len()).unwrap_or(0))
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.values().flatten().find(|t| t.id == id).cloned())
    }

    /// Transactions whose ID matches a user-typed identifier
    pub fn find_by_ident(&self, ident: &str) -> Result<Vec<Transaction>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data
            .values()
            .flatten()
            .filter(|t| t.id.matches(ident))
            .cloned()
            .collect())
    }

    /// Replace a stored transaction with the same ID
    ///
    /// The transaction is re-bucketed if its date moved to another month.
    pub fn update(&self, txn: Transaction) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut found = false;
        for txns in data.values_mut() {
            let before = txns.len();
            txns.retain(|t| t.id != txn.id);
            found |= txns.len() != before;
        }
        if !found {
            return Err(ExpenseError::transaction_not_found(txn.id.to_string()));
        }

        data.retain(|_, txns| !txns.is_empty());
        data.entry(txn.month()).or_default().push(txn);
        Ok(())
    }

    /// Delete transactions by ID, returning how many were removed
    pub fn delete(&self, ids: &[TransactionId]) -> Result<usize, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut removed = 0;
        for txns in data.values_mut() {
            let before = txns.len();
            txns.retain(|t| !ids.contains(&t.id));
            removed += before - txns.len();
        }
        data.retain(|_, txns| !txns.is_empty());
        Ok(removed)
    }

    /// Insert transactions into the buckets of their own months
    ///
    /// A transaction equal to an already-stored row (or to an earlier row of
    /// the same batch) on date, description, amount and type is skipped.
    pub fn insert_new(&self, batch: Vec<Transaction>) -> Result<InsertOutcome, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut outcome = InsertOutcome::default();
        for txn in batch {
            let bucket = data.entry(txn.month()).or_default();
            if bucket.iter().any(|t| t.same_row_as(&txn)) {
                debug!("skipping duplicate row: {}", txn);
                outcome.duplicates.push(txn);
            } else {
                bucket.push(txn.clone());
                outcome.inserted.push(txn);
            }
        }
        data.retain(|_, txns| !txns.is_empty());
        Ok(outcome)
    }

    /// Total number of stored transactions
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.values().map(Vec::len).sum())
    }
}
