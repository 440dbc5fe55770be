//! Transaction service
//!
//! Month-scoped listing and editing of imported transactions, plus the
//! operations that feed the category memory.

use log::{debug, info};

use crate::categorizer::Categorizer;
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{MonthKey, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Options for filtering a month's transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only credit or only debit rows
    pub transaction_type: Option<TransactionType>,
    /// Exact category name (case-insensitive)
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.transaction_type {
            if txn.transaction_type != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !txn.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        true
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Months with data, newest first
    pub fn months(&self) -> ExpenseResult<Vec<MonthKey>> {
        self.storage.transactions.months()
    }

    /// Years with data, newest first
    pub fn years(&self) -> ExpenseResult<Vec<i32>> {
        self.storage.transactions.years()
    }

    pub fn months_in_year(&self, year: i32) -> ExpenseResult<Vec<MonthKey>> {
        self.storage.transactions.months_in_year(year)
    }

    /// List one month's transactions, sorted by date
    pub fn list(&self, month: MonthKey, filter: &TransactionFilter) -> ExpenseResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_month(month)?;
        transactions.retain(|t| filter.matches(t));
        Ok(transactions)
    }

    /// Find a transaction by its full UUID or a unique ID prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<Transaction> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            if let Some(txn) = self.storage.transactions.get(id)? {
                return Ok(txn);
            }
        }

        let mut matches = self.storage.transactions.find_by_ident(identifier)?;
        match matches.len() {
            0 => Err(ExpenseError::transaction_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(ExpenseError::Validation(format!(
                "Transaction ID '{}' is ambiguous ({} matches)",
                identifier, n
            ))),
        }
    }

    /// Check that a category can be assigned
    ///
    /// Any flat category of the taxonomy is accepted, as is the fallback.
    /// Returns the name as the taxonomy spells it.
    pub fn validate_category(&self, category: &str) -> ExpenseResult<String> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ExpenseError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if category.eq_ignore_ascii_case(&self.settings.fallback_category) {
            return Ok(self.settings.fallback_category.clone());
        }

        self.storage
            .categories
            .flat()?
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(category))
            .ok_or_else(|| ExpenseError::category_not_found(category))
    }

    /// Assign a category to a transaction
    ///
    /// With `learn`, the description's memory key is pointed at the category
    /// so future imports pick it up.
    pub fn set_category(&self, identifier: &str, category: &str, learn: bool) -> ExpenseResult<Transaction> {
        let category = self.validate_category(category)?;
        let mut txn = self.find(identifier)?;

        txn.category = category.clone();
        self.storage.transactions.update(txn.clone())?;
        self.storage.transactions.save()?;

        if learn {
            let words = self.settings.memory_key_words;
            let key = self
                .storage
                .memory
                .update(|memory| memory.learn(&txn.description, &category, words))?;
            if let Some(key) = key {
                debug!("learned '{}' -> {}", key, category);
                self.storage.memory.save()?;
            }
        }

        Ok(txn)
    }

    /// Delete transactions by identifier
    ///
    /// Every identifier must resolve before anything is removed.
    pub fn delete(&self, identifiers: &[String]) -> ExpenseResult<usize> {
        let ids = identifiers
            .iter()
            .map(|ident| self.find(ident).map(|t| t.id))
            .collect::<ExpenseResult<Vec<_>>>()?;

        let removed = self.storage.transactions.delete(&ids)?;
        if removed > 0 {
            self.storage.transactions.save()?;
        }
        Ok(removed)
    }

    /// Remove a whole month bucket
    pub fn delete_month(&self, month: MonthKey) -> ExpenseResult<usize> {
        let removed = self.storage.transactions.remove_month(month)?;
        if removed == 0 {
            return Err(ExpenseError::NotFound {
                entity_type: "Transactions for month",
                identifier: month.to_string(),
            });
        }
        self.storage.transactions.save()?;
        info!("deleted {} transaction(s) for {}", removed, month);
        Ok(removed)
    }

    /// Re-run the categorizer over a month with the current memory and rules
    ///
    /// Returns the number of transactions whose category changed.
    pub fn recategorize_month(&self, month: MonthKey) -> ExpenseResult<usize> {
        let categorizer = Categorizer::from_settings(self.settings, self.storage.memory.get()?);
        let mut transactions = self.storage.transactions.get_month(month)?;

        let mut changed = 0;
        for txn in &mut transactions {
            let category = categorizer.categorize(&txn.description);
            if txn.category != category {
                txn.category = category;
                changed += 1;
            }
        }

        if changed > 0 {
            self.storage.transactions.set_month(month, transactions)?;
            self.storage.transactions.save()?;
        }
        Ok(changed)
    }

    /// Record every categorized transaction of a month in the memory
    ///
    /// Rows still in the fallback category teach nothing. Returns the number
    /// of memory keys written.
    pub fn learn_from_month(&self, month: MonthKey) -> ExpenseResult<usize> {
        let transactions = self.storage.transactions.get_month(month)?;
        let words = self.settings.memory_key_words;
        let fallback = &self.settings.fallback_category;

        let learned = self.storage.memory.update(|memory| {
            transactions
                .iter()
                .filter(|t| &t.category != fallback)
                .filter_map(|t| memory.learn(&t.description, &t.category, words))
                .count()
        })?;

        if learned > 0 {
            self.storage.memory.save()?;
        }
        Ok(learned)
    }

    /// Count transactions
    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Money;
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

    fn seed(storage: &Storage) -> Vec<Transaction> {
        let rows = vec![
            Transaction::new(
                NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                "LOBLAWS STORE 1012",
                Money::from_cents(8_000),
                "Other",
                TransactionType::Debit,
            ),
            Transaction::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                "UBER TRIP",
                Money::from_cents(1_250),
                "Public Transportation",
                TransactionType::Debit,
            ),
            Transaction::new(
                NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
                "PAYROLL DEPOSIT",
                Money::from_cents(250_000),
                "Other",
                TransactionType::Credit,
            ),
        ];
        storage.transactions.insert_new(rows.clone()).unwrap();
        rows
    }

    fn june() -> MonthKey {
        MonthKey::parse("2025-06").unwrap()
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        seed(&storage);
        let service = TransactionService::new(&storage, &settings);

        let all = service.list(june(), &TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].description, "UBER TRIP");

        let debits = service
            .list(june(), &TransactionFilter::new().transaction_type(TransactionType::Debit))
            .unwrap();
        assert_eq!(debits.len(), 2);

        let other = service
            .list(june(), &TransactionFilter::new().category("other"))
            .unwrap();
        assert_eq!(other.len(), 2);

        let empty = service
            .list(MonthKey::parse("2024-01").unwrap(), &TransactionFilter::new())
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_set_category_learns() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let rows = seed(&storage);
        let service = TransactionService::new(&storage, &settings);

        let updated = service
            .set_category(&rows[0].id.to_string(), "groceries", true)
            .unwrap();
        assert_eq!(updated.category, "Groceries");
        assert_eq!(storage.transactions.get(rows[0].id).unwrap().unwrap().category, "Groceries");
        assert_eq!(storage.memory.get().unwrap().get("loblaws store"), Some("Groceries"));
    }

    #[test]
    fn test_set_category_rejects_unknown() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let rows = seed(&storage);
        let service = TransactionService::new(&storage, &settings);

        let err = service
            .set_category(&rows[0].id.to_string(), "Yachts", false)
            .unwrap_err();
        assert!(err.is_not_found());

        let fallback = service.set_category(&rows[1].id.to_string(), "other", false).unwrap();
        assert_eq!(fallback.category, "Other");
        assert!(storage.memory.get().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let rows = seed(&storage);
        let service = TransactionService::new(&storage, &settings);

        let short = rows[1].id.short();
        assert_eq!(service.find(&short).unwrap().id, rows[1].id);
        assert!(service.find("txn-zzzzzzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_and_delete_month() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let rows = seed(&storage);
        let service = TransactionService::new(&storage, &settings);

        let missing = service.delete(&[rows[0].id.to_string(), "txn-zzzzzzzz".into()]);
        assert!(missing.is_err());
        assert_eq!(service.count().unwrap(), 3);

        assert_eq!(service.delete(&[rows[0].id.to_string()]).unwrap(), 1);
        assert_eq!(service.delete_month(june()).unwrap(), 2);
        assert!(service.months().unwrap().is_empty());
        assert!(service.delete_month(june()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_recategorize_and_learn() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        seed(&storage);
        let service = TransactionService::new(&storage, &settings);

        storage
            .memory
            .update(|m| m.set("payroll deposit", "Salary"))
            .unwrap();
        assert_eq!(service.recategorize_month(june()).unwrap(), 1);

        let credits = service
            .list(june(), &TransactionFilter::new().transaction_type(TransactionType::Credit))
            .unwrap();
        assert_eq!(credits[0].category, "Salary");

        storage.memory.update(|m| m.clear()).unwrap();
        // LOBLAWS is still "Other" and teaches nothing
        assert_eq!(service.learn_from_month(june()).unwrap(), 2);
        let memory = storage.memory.get().unwrap();
        assert_eq!(memory.get("uber trip"), Some("Public Transportation"));
        assert_eq!(memory.get("payroll deposit"), Some("Salary"));
    }
}
