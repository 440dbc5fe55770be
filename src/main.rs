use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use expense_manager::cli::{
    handle_category_command, handle_dashboard_command, handle_export_command,
    handle_import_command, handle_memory_command, handle_transaction_command,
};
use expense_manager::config::{paths::ExpensePaths, settings::Settings};
use expense_manager::display::format_category_tree;
use expense_manager::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracking from bank CSV exports",
    long_about = "Imports bank CSV exports, auto-categorizes transactions with \
                  keyword rules and a learned memory, and keeps monthly income \
                  and balance dashboards in plain JSON files."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import bank CSV exports
    Import(expense_manager::cli::ImportArgs),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(expense_manager::cli::TransactionCommands),

    /// Category taxonomy commands
    #[command(subcommand)]
    Category(expense_manager::cli::CategoryCommands),

    /// Learned category memory commands
    #[command(subcommand)]
    Memory(expense_manager::cli::MemoryCommands),

    /// Monthly dashboard commands
    #[command(subcommand)]
    Dashboard(expense_manager::cli::DashboardCommands),

    /// Export commands
    #[command(subcommand)]
    Export(expense_manager::cli::ExportCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense manager at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            let storage = open_storage(&paths)?;
            println!("Categories:");
            println!();
            print!("{}", format_category_tree(storage.categories.get()?.groups()));
            println!();
            println!("Run 'expense import <file.csv>' to load a bank export.");
        }
        Some(Commands::Config) => {
            println!("Expense Manager Configuration");
            println!("=============================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Memory key words: {}", settings.memory_key_words);
            println!("  Fallback:         {}", settings.fallback_category);
            println!("  Keyword rules:");
            for rule in &settings.keyword_rules {
                println!("    {:<24} {}", rule.category, rule.keywords.join(", "));
            }
        }
        Some(Commands::Import(args)) => {
            let storage = open_storage(&paths)?;
            handle_import_command(&storage, &settings, args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Memory(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_memory_command(&storage, cmd)?;
        }
        Some(Commands::Dashboard(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_dashboard_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_export_command(&storage, cmd)?;
        }
        None => {
            println!("Expense Manager - track spending from bank CSV exports");
            println!();
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}

/// Load storage, creating the starter data on first run
fn open_storage(paths: &ExpensePaths) -> Result<Storage> {
    let mut storage = Storage::new(paths.clone())?;
    if !storage.is_initialized() {
        info!("first run, creating starter data in {}", paths.base_dir().display());
        initialize_storage(paths)?;
    }
    storage.load_all()?;
    Ok(storage)
}
