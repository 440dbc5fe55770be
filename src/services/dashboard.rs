//! Dashboard service
//!
//! Per-month income lines and account balances, and the month's spending
//! overview computed from its transactions.

use std::collections::HashMap;

use log::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DashboardSummary, Money, MonthDashboard, MonthKey};
use crate::storage::Storage;

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: String,
    /// Parent in the taxonomy, if the category is still listed there
    pub parent: Option<String>,
    /// Total spent, as a positive amount
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the month's spending
    pub percentage: f64,
}

/// Where a month's money went
#[derive(Debug, Clone)]
pub struct ExpenseOverview {
    pub month: MonthKey,
    /// Debit spending per category, largest first
    pub categories: Vec<CategorySpending>,
    /// Total debit spending, as a positive amount
    pub total_spending: Money,
    pub debit_count: usize,
    /// Net of all credit rows
    pub credit_total: Money,
    pub credit_count: usize,
}

impl ExpenseOverview {
    pub fn is_empty(&self) -> bool {
        self.debit_count == 0 && self.credit_count == 0
    }
}

/// Service for monthly dashboards
pub struct DashboardService<'a> {
    storage: &'a Storage,
}

impl<'a> DashboardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Months with a dashboard, newest first
    pub fn months(&self) -> ExpenseResult<Vec<MonthKey>> {
        self.storage.dashboards.months()
    }

    pub fn get(&self, month: MonthKey) -> ExpenseResult<MonthDashboard> {
        self.storage
            .dashboards
            .get(month)?
            .ok_or_else(|| ExpenseError::dashboard_not_found(month.to_string()))
    }

    /// Create a month's dashboard with a zero income line per category
    pub fn create(&self, month: MonthKey) -> ExpenseResult<MonthDashboard> {
        if self.storage.dashboards.get(month)?.is_some() {
            return Err(ExpenseError::Duplicate {
                entity_type: "Dashboard",
                identifier: month.to_string(),
            });
        }

        let flat = self.storage.categories.flat()?;
        let dashboard = MonthDashboard::with_categories(flat.iter().map(String::as_str));
        self.storage.dashboards.upsert(month, dashboard.clone())?;
        self.storage.dashboards.save()?;
        info!("created dashboard for {}", month);
        Ok(dashboard)
    }

    pub fn summary(&self, month: MonthKey) -> ExpenseResult<DashboardSummary> {
        Ok(self.get(month)?.summary())
    }

    /// Set the income line of a category
    ///
    /// The category must already have a line or be part of the taxonomy.
    pub fn set_income(&self, month: MonthKey, category: &str, amount: Money) -> ExpenseResult<MonthDashboard> {
        let mut dashboard = self.get(month)?;

        let name = match dashboard.income.keys().find(|k| k.eq_ignore_ascii_case(category)) {
            Some(existing) => existing.clone(),
            None => self
                .storage
                .categories
                .flat()?
                .into_iter()
                .find(|c| c.eq_ignore_ascii_case(category))
                .ok_or_else(|| ExpenseError::category_not_found(category))?,
        };

        dashboard.income.insert(name, amount);
        self.storage.dashboards.upsert(month, dashboard.clone())?;
        self.storage.dashboards.save()?;
        Ok(dashboard)
    }

    /// Add or update an account balance; returns true if the account is new
    pub fn set_balance(&self, month: MonthKey, account: &str, amount: Money) -> ExpenseResult<bool> {
        let account = account.trim();
        if account.is_empty() {
            return Err(ExpenseError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        let mut dashboard = self.get(month)?;
        let added = dashboard.balances.insert(account.to_string(), amount).is_none();
        self.storage.dashboards.upsert(month, dashboard)?;
        self.storage.dashboards.save()?;
        Ok(added)
    }

    pub fn remove_balance(&self, month: MonthKey, account: &str) -> ExpenseResult<Money> {
        let mut dashboard = self.get(month)?;
        let removed = dashboard
            .balances
            .remove(account.trim())
            .ok_or_else(|| ExpenseError::NotFound {
                entity_type: "Account balance",
                identifier: account.to_string(),
            })?;
        self.storage.dashboards.upsert(month, dashboard)?;
        self.storage.dashboards.save()?;
        Ok(removed)
    }

    pub fn delete(&self, month: MonthKey) -> ExpenseResult<()> {
        if !self.storage.dashboards.remove(month)? {
            return Err(ExpenseError::dashboard_not_found(month.to_string()));
        }
        self.storage.dashboards.save()
    }

    /// Spending by category for a month's transactions
    pub fn expense_overview(&self, month: MonthKey) -> ExpenseResult<ExpenseOverview> {
        let structure = self.storage.categories.get()?;
        let transactions = self.storage.transactions.get_month(month)?;

        let mut by_category: HashMap<String, (Money, usize)> = HashMap::new();
        let mut total_spending = Money::zero();
        let mut debit_count = 0;
        let mut credit_total = Money::zero();
        let mut credit_count = 0;

        for txn in &transactions {
            if txn.is_credit() {
                credit_total += txn.amount;
                credit_count += 1;
                continue;
            }
            let spent = txn.amount.abs();
            let entry = by_category
                .entry(txn.category.clone())
                .or_insert((Money::zero(), 0));
            entry.0 += spent;
            entry.1 += 1;
            total_spending += spent;
            debit_count += 1;
        }

        let total_cents = total_spending.cents();
        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(category, (total, transaction_count))| {
                let percentage = if total_cents > 0 {
                    (total.cents() as f64 / total_cents as f64) * 100.0
                } else {
                    0.0
                };
                CategorySpending {
                    parent: structure.parent_of(&category).map(String::from),
                    category,
                    total,
                    transaction_count,
                    percentage,
                }
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Ok(ExpenseOverview {
            month,
            categories,
            total_spending,
            debit_count,
            credit_total,
            credit_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::config::Settings;
    use crate::models::{Transaction, TransactionType, MAX_PARSED_CENTS};
    use crate::services::ImportService;
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

    fn july() -> MonthKey {
        MonthKey::parse("2025-07").unwrap()
    }

    #[test]
    fn test_create_zeroes_every_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DashboardService::new(&storage);

        let dashboard = service.create(july()).unwrap();
        assert_eq!(dashboard.income.len(), storage.categories.flat().unwrap().len());
        assert!(dashboard.income.values().all(|m| m.is_zero()));

        assert!(service.create(july()).unwrap_err().is_duplicate());
        assert_eq!(service.months().unwrap(), vec![july()]);
    }

    #[test]
    fn test_income_and_balances_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DashboardService::new(&storage);
        service.create(july()).unwrap();

        service.set_income(july(), "rent", Money::from_cents(200_000)).unwrap();
        assert!(service
            .set_income(july(), "Yachts", Money::from_cents(1))
            .unwrap_err()
            .is_not_found());

        assert!(service.set_balance(july(), "Visa", Money::from_cents(50_000)).unwrap());
        assert!(!service.set_balance(july(), "Visa", Money::from_cents(60_000)).unwrap());
        service.set_balance(july(), "Chequing", Money::from_cents(10_000)).unwrap();

        let summary = service.summary(july()).unwrap();
        assert_eq!(summary.income_total.cents(), 200_000);
        assert_eq!(summary.balance_total.cents(), 70_000);
        assert_eq!(summary.outstanding.cents(), 130_000);

        assert_eq!(service.remove_balance(july(), "Visa").unwrap().cents(), 60_000);
        assert!(service.remove_balance(july(), "Visa").unwrap_err().is_not_found());
    }

    #[test]
    fn test_missing_dashboard() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DashboardService::new(&storage);

        assert!(service.summary(july()).unwrap_err().is_not_found());
        assert!(service.delete(july()).unwrap_err().is_not_found());

        service.create(july()).unwrap();
        service.delete(july()).unwrap();
        assert!(service.months().unwrap().is_empty());
    }

    #[test]
    fn test_expense_overview() {
        let (_temp_dir, storage) = create_test_storage();
        let date = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        let rows = vec![
            Transaction::new(date, "RENT", Money::from_cents(150_000), "Rent", TransactionType::Debit),
            Transaction::new(date, "WALMART", Money::from_cents(30_000), "Groceries", TransactionType::Debit),
            Transaction::new(date, "FOOD BASICS", Money::from_cents(20_000), "Groceries", TransactionType::Debit),
            Transaction::new(date, "REFUND", Money::from_cents(-5_000), "Other", TransactionType::Credit),
            Transaction::new(date, "STARBUCKS", Money::from_cents(900), "Dining Out", TransactionType::Credit),
        ];
        storage.transactions.insert_new(rows).unwrap();

        let overview = DashboardService::new(&storage).expense_overview(july()).unwrap();
        assert_eq!(overview.total_spending.cents(), 200_000);
        assert_eq!(overview.debit_count, 3);
        assert_eq!(overview.credit_count, 2);
        assert_eq!(overview.credit_total.cents(), -4_100);

        assert_eq!(overview.categories[0].category, "Rent");
        assert_eq!(overview.categories[0].parent.as_deref(), Some("Living"));
        assert!((overview.categories[0].percentage - 75.0).abs() < 0.01);
        assert_eq!(overview.categories[1].transaction_count, 2);
    }

    #[test]
    fn test_expense_overview_empty_month() {
        let (_temp_dir, storage) = create_test_storage();
        let overview = DashboardService::new(&storage).expense_overview(july()).unwrap();
        assert!(overview.is_empty());
        assert!(overview.categories.is_empty());
    }

    #[test]
    fn test_expense_overview_with_huge_amounts() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let csv = "2025-07-01,BIG A,100000000000.00\n\
                   2025-07-02,BIG B,100000000000.00\n\
                   2025-07-03,TOO BIG,90000000000000000\n\
                   2025-07-04,TOO BIG AGAIN,90000000000000000\n";
        let result = ImportService::new(&storage, &settings)
            .import_payload(csv, TransactionType::Debit)
            .unwrap();
        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped.len(), 2);
        assert!(result.skipped[0].reason.contains("out of range"));

        let overview = DashboardService::new(&storage).expense_overview(july()).unwrap();
        assert_eq!(overview.debit_count, 2);
        assert_eq!(overview.total_spending.cents(), 2 * MAX_PARSED_CENTS);
    }
}
