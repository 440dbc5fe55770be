//! Transaction CLI commands
//!
//! Implements CLI commands for viewing and editing imported transactions.

use clap::Subcommand;

use super::resolve_month;
use crate::config::Settings;
use crate::display::{format_month_list, format_transaction_details, format_transaction_table};
use crate::error::ExpenseResult;
use crate::models::{MonthKey, TransactionType};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List a month's transactions (defaults to the newest month)
    List {
        /// Month as YYYY-MM
        month: Option<MonthKey>,
        /// Only credit or debit rows
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        /// Only rows in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (or unique prefix)
        id: String,
    },

    /// Assign a category to a transaction
    #[command(name = "set-category")]
    SetCategory {
        /// Transaction ID (or unique prefix)
        id: String,
        /// Category name
        category: String,
        /// Do not remember this choice for future imports
        #[arg(long)]
        no_learn: bool,
    },

    /// Delete transactions
    Delete {
        /// Transaction IDs (or unique prefixes)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Delete every transaction of a month
    #[command(name = "delete-month")]
    DeleteMonth {
        /// Month as YYYY-MM
        month: MonthKey,
    },

    /// Re-run auto-categorization over a month
    Recategorize {
        /// Month as YYYY-MM
        month: MonthKey,
    },

    /// Remember the categories of a month for future imports
    Learn {
        /// Month as YYYY-MM
        month: MonthKey,
    },

    /// List months that have transactions
    Months {
        /// Only months of this year
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage, settings);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::List {
            month,
            transaction_type,
            category,
        } => {
            let month = resolve_month(storage, month)?;
            let filter = TransactionFilter {
                transaction_type,
                category,
            };
            let transactions = service.list(month, &filter)?;

            println!("{} - {} transaction(s)", month.label(), transactions.len());
            println!("{}", format_transaction_table(&transactions, currency));
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!("{}", format_transaction_details(&txn, currency));
        }

        TransactionCommands::SetCategory {
            id,
            category,
            no_learn,
        } => {
            let txn = service.set_category(&id, &category, !no_learn)?;
            println!(
                "{} '{}' is now in {}",
                txn.id.short(),
                txn.description,
                txn.category
            );
        }

        TransactionCommands::Delete { ids } => {
            let removed = service.delete(&ids)?;
            println!("Deleted {} transaction(s)", removed);
        }

        TransactionCommands::DeleteMonth { month } => {
            let removed = service.delete_month(month)?;
            println!("Deleted {} transaction(s) from {}", removed, month.label());
        }

        TransactionCommands::Recategorize { month } => {
            let changed = service.recategorize_month(month)?;
            println!("Re-categorized {} transaction(s) in {}", changed, month.label());
        }

        TransactionCommands::Learn { month } => {
            let learned = service.learn_from_month(month)?;
            println!(
                "Learned {} memory entr{} from {}",
                learned,
                if learned == 1 { "y" } else { "ies" },
                month.label()
            );
        }

        TransactionCommands::Months { year } => {
            let months = match year {
                Some(year) => service.months_in_year(year)?,
                None => service.months()?,
            };
            let mut counted = Vec::with_capacity(months.len());
            for month in months {
                let count = storage.transactions.get_month(month)?.len();
                counted.push((month, count));
            }
            print!("{}", format_month_list(&counted));
        }
    }

    Ok(())
}
