//! Dashboard display formatting
//!
//! Income and balance tables, the month summary and the expense overview.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{MonthDashboard, MonthKey};
use crate::services::ExpenseOverview;

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct SpendingRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format a full month dashboard
pub fn format_dashboard(month: MonthKey, dashboard: &MonthDashboard, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Dashboard: {}\n\n", month.label()));

    output.push_str("Income\n");
    let income = dashboard.income.iter().map(|(name, amount)| LineRow {
        name: name.clone(),
        amount: amount.format_with_symbol(currency),
    });
    output.push_str(&Table::new(income).with(Style::rounded()).to_string());
    output.push_str("\n\n");

    output.push_str("Balances\n");
    if dashboard.balances.is_empty() {
        output.push_str("  (no accounts)\n");
    } else {
        let balances = dashboard.balances.iter().map(|(name, amount)| LineRow {
            name: name.clone(),
            amount: amount.format_with_symbol(currency),
        });
        output.push_str(&Table::new(balances).with(Style::rounded()).to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(dashboard, currency));
    output
}

/// Totals and outstanding amount
pub fn format_summary(dashboard: &MonthDashboard, currency: &str) -> String {
    let summary = dashboard.summary();
    format!(
        "Total income:   {:>14}\nTotal balances: {:>14}\nOutstanding:    {:>14}\n",
        summary.income_total.format_with_symbol(currency),
        summary.balance_total.format_with_symbol(currency),
        summary.outstanding.format_with_symbol(currency),
    )
}

/// Months with a dashboard
pub fn format_dashboard_list(months: &[MonthKey]) -> String {
    if months.is_empty() {
        return "No dashboards yet. Create one with 'expense dashboard create <YYYY-MM>'."
            .to_string();
    }
    let mut output = String::from("Dashboards:\n");
    for month in months {
        output.push_str(&format!("  {}\n", month.label()));
    }
    output
}

/// Format the spending overview of a month
pub fn format_expense_overview(overview: &ExpenseOverview, currency: &str) -> String {
    if overview.is_empty() {
        return format!("No transactions for {}.", overview.month.label());
    }

    let mut output = String::new();
    output.push_str(&format!("Expenses: {}\n\n", overview.month.label()));

    if overview.categories.is_empty() {
        output.push_str("No debit transactions.\n");
    } else {
        let rows = overview.categories.iter().map(|c| SpendingRow {
            category: c.category.clone(),
            parent: c.parent.clone().unwrap_or_else(|| "-".to_string()),
            count: c.transaction_count,
            spent: c.total.format_with_symbol(currency),
            share: format!("{:.1}%", c.percentage),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    output.push_str(&format!(
        "\nTotal spending: {} ({} debit transaction(s))\n",
        overview.total_spending.format_with_symbol(currency),
        overview.debit_count
    ));
    output.push_str(&format!(
        "Credit total:   {} ({} credit transaction(s))\n",
        overview.credit_total.format_with_symbol(currency),
        overview.credit_count
    ));
    output
}
