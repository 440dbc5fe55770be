//! Transaction display formatting
//!
//! Month tables of transactions and single-transaction details.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{MonthKey, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Format a month's transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.short(),
        date: txn.date.format("%Y-%m-%d").to_string(),
        description: truncate(&txn.description, 40),
        amount: txn.amount.format_with_symbol(currency),
        category: txn.category.clone(),
        kind: txn.transaction_type.to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id.short()));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Month:       {}\n", txn.month()));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(currency)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type));

    output
}

/// Format stored months grouped by year, newest first
pub fn format_month_list(months: &[(MonthKey, usize)]) -> String {
    if months.is_empty() {
        return "No transactions stored yet. Import a CSV with 'expense import'.".to_string();
    }

    let mut output = String::new();
    let mut current_year = None;
    for (month, count) in months {
        if current_year != Some(month.year()) {
            if current_year.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("{}\n", month.year()));
            current_year = Some(month.year());
        }
        output.push_str(&format!("  {:<20} {:>5} transaction(s)\n", month.label(), count));
    }
    output
}

/// Shorten text to `max_len` characters, ending in "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
