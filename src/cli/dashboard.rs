//! Dashboard CLI commands
//!
//! Monthly income lines, account balances and the spending overview.

use clap::Subcommand;

use super::{parse_amount, resolve_month};
use crate::config::Settings;
use crate::display::{format_dashboard, format_dashboard_list, format_expense_overview, format_summary};
use crate::error::ExpenseResult;
use crate::models::MonthKey;
use crate::services::DashboardService;
use crate::storage::Storage;

/// Dashboard subcommands
#[derive(Subcommand)]
pub enum DashboardCommands {
    /// List months with a dashboard
    List,

    /// Create a dashboard with a zero income line per category
    Create {
        /// Month as YYYY-MM
        month: MonthKey,
    },

    /// Show a dashboard with its summary
    Show {
        /// Month as YYYY-MM
        month: MonthKey,
    },

    /// Set the income line of a category
    #[command(name = "set-income")]
    SetIncome {
        /// Month as YYYY-MM
        month: MonthKey,
        /// Category name
        category: String,
        /// Amount, e.g. "2500" or "2,500.00"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Add or update an account balance
    #[command(name = "set-balance")]
    SetBalance {
        /// Month as YYYY-MM
        month: MonthKey,
        /// Account name
        account: String,
        /// Amount owed on the account
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove an account balance
    #[command(name = "remove-balance")]
    RemoveBalance {
        /// Month as YYYY-MM
        month: MonthKey,
        /// Account name
        account: String,
    },

    /// Delete a month's dashboard
    Delete {
        /// Month as YYYY-MM
        month: MonthKey,
    },

    /// Spending by category for a month (defaults to the newest month)
    Expenses {
        /// Month as YYYY-MM
        month: Option<MonthKey>,
    },
}

/// Handle a dashboard command
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DashboardCommands,
) -> ExpenseResult<()> {
    let service = DashboardService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        DashboardCommands::List => {
            print!("{}", format_dashboard_list(&service.months()?));
        }

        DashboardCommands::Create { month } => {
            let dashboard = service.create(month)?;
            println!(
                "Created dashboard for {} with {} income line(s)",
                month.label(),
                dashboard.income.len()
            );
        }

        DashboardCommands::Show { month } => {
            let dashboard = service.get(month)?;
            print!("{}", format_dashboard(month, &dashboard, currency));
        }

        DashboardCommands::SetIncome {
            month,
            category,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            let dashboard = service.set_income(month, &category, amount)?;
            println!(
                "Income for {} set to {}",
                category,
                amount.format_with_symbol(currency)
            );
            print!("{}", format_summary(&dashboard, currency));
        }

        DashboardCommands::SetBalance {
            month,
            account,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            let added = service.set_balance(month, &account, amount)?;
            let verb = if added { "Added" } else { "Updated" };
            println!(
                "{} balance '{}': {}",
                verb,
                account.trim(),
                amount.format_with_symbol(currency)
            );
            print!("{}", format_summary(&service.get(month)?, currency));
        }

        DashboardCommands::RemoveBalance { month, account } => {
            let removed = service.remove_balance(month, &account)?;
            println!(
                "Removed balance '{}' ({})",
                account,
                removed.format_with_symbol(currency)
            );
        }

        DashboardCommands::Delete { month } => {
            service.delete(month)?;
            println!("Deleted dashboard for {}", month.label());
        }

        DashboardCommands::Expenses { month } => {
            let month = resolve_month(storage, month)?;
            let overview = service.expense_overview(month)?;
            println!("{}", format_expense_overview(&overview, currency));
        }
    }

    Ok(())
}
