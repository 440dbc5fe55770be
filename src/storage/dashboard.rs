//! Dashboard repository
//!
//! Manages loading and saving per-month income and balances to
//! dashboard_data.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{MonthDashboard, MonthKey};

use super::file_io::{read_json, write_json_atomic};

/// Repository for monthly dashboards
pub struct DashboardRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<MonthKey, MonthDashboard>>,
}

impl DashboardRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: BTreeMap<MonthKey, MonthDashboard> = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Months with a dashboard, newest first
    pub fn months(&self) -> Result<Vec<MonthKey>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.keys().rev().copied().collect())
    }

    pub fn get(&self, month: MonthKey) -> Result<Option<MonthDashboard>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&month).cloned())
    }

    pub fn all(&self) -> Result<BTreeMap<MonthKey, MonthDashboard>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Insert or replace a month's dashboard
    pub fn upsert(&self, month: MonthKey, dashboard: MonthDashboard) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(month, dashboard);
        Ok(())
    }

    pub fn remove(&self, month: MonthKey) -> Result<bool, ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&month).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_save_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashboard_data.json");
        let repo = DashboardRepository::new(path.clone());
        repo.load().unwrap();

        let month = MonthKey::parse("2025-07").unwrap();
        let mut dash = MonthDashboard::with_categories(["Salary"]);
        dash.balances.insert("Visa".into(), Money::from_cents(9_999));
        repo.upsert(month, dash.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = DashboardRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get(month).unwrap(), Some(dash));
        assert_eq!(repo2.months().unwrap(), vec![month]);
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let repo = DashboardRepository::new(temp_dir.path().join("d.json"));
        let month = MonthKey::parse("2025-07").unwrap();

        assert!(!repo.remove(month).unwrap());
        repo.upsert(month, MonthDashboard::default()).unwrap();
        assert!(repo.remove(month).unwrap());
    }
}
