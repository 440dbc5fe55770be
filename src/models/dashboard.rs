//! Monthly dashboard model
//!
//! Each month bucket records expected income per category and the balances
//! of the user's accounts. The summary compares the two.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;

/// Income and balances for one month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDashboard {
    /// Income line per category
    #[serde(default)]
    pub income: BTreeMap<String, Money>,

    /// Balance per account
    #[serde(default)]
    pub balances: BTreeMap<String, Money>,
}

/// Totals shown on the dashboard overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub income_total: Money,
    pub balance_total: Money,
    /// Income total minus balance total
    pub outstanding: Money,
}

impl MonthDashboard {
    /// A fresh dashboard with a zero income line for every category
    pub fn with_categories<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            income: categories
                .into_iter()
                .map(|c| (c.to_string(), Money::zero()))
                .collect(),
            balances: BTreeMap::new(),
        }
    }

    pub fn summary(&self) -> DashboardSummary {
        let income_total: Money = self.income.values().sum();
        let balance_total: Money = self.balances.values().sum();
        DashboardSummary {
            income_total,
            balance_total,
            outstanding: income_total - balance_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_categories_zeroes_income() {
        let dash = MonthDashboard::with_categories(["Rent", "Groceries"]);
        assert_eq!(dash.income.len(), 2);
        assert!(dash.income.values().all(|m| m.is_zero()));
        assert!(dash.balances.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut dash = MonthDashboard::with_categories(["Salary", "Side"]);
        dash.income.insert("Salary".into(), Money::from_cents(500_000));
        dash.income.insert("Side".into(), Money::from_cents(25_000));
        dash.balances.insert("Visa".into(), Money::from_cents(120_000));
        dash.balances.insert("Chequing".into(), Money::from_cents(30_000));

        let summary = dash.summary();
        assert_eq!(summary.income_total.cents(), 525_000);
        assert_eq!(summary.balance_total.cents(), 150_000);
        assert_eq!(summary.outstanding.cents(), 375_000);
    }

    #[test]
    fn test_missing_fields_default() {
        let dash: MonthDashboard = serde_json::from_str(r#"{"income": {"Rent": 100}}"#).unwrap();
        assert_eq!(dash.income["Rent"].cents(), 100);
        assert!(dash.balances.is_empty());
    }
}
