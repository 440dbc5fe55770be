//! Category memory CLI commands

use clap::Subcommand;

use crate::display::format_memory_table;
use crate::error::ExpenseResult;
use crate::services::MemoryService;
use crate::storage::Storage;

/// Memory subcommands
#[derive(Subcommand)]
pub enum MemoryCommands {
    /// List learned description -> category entries
    List,

    /// Remember a category for descriptions containing a key
    Set {
        /// Description words, e.g. "tim hortons"
        key: String,
        /// Category name
        category: String,
    },

    /// Forget one key
    Forget {
        key: String,
    },

    /// Forget everything
    Clear,
}

/// Handle a memory command
pub fn handle_memory_command(storage: &Storage, cmd: MemoryCommands) -> ExpenseResult<()> {
    let service = MemoryService::new(storage);

    match cmd {
        MemoryCommands::List => {
            println!("{}", format_memory_table(&service.list()?));
        }
        MemoryCommands::Set { key, category } => {
            let key = service.set(&key, &category)?;
            println!("'{}' -> {}", key, category.trim());
        }
        MemoryCommands::Forget { key } => {
            let category = service.forget(&key)?;
            println!("Forgot '{}' (was {})", key, category);
        }
        MemoryCommands::Clear => {
            let count = service.clear()?;
            println!("Cleared {} memory entr{}", count, if count == 1 { "y" } else { "ies" });
        }
    }

    Ok(())
}
