//! Category CLI commands
//!
//! Implements CLI commands for editing the parent/subcategory taxonomy.

use clap::Subcommand;

use crate::display::category::{format_category_tree, format_flat_categories};
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (organized by parent)
    List {
        /// One subcategory per line, without parents
        #[arg(long)]
        flat: bool,
    },

    /// Add a parent category with its subcategories
    #[command(name = "add-parent")]
    AddParent {
        /// Parent name
        name: String,
        /// Comma-separated subcategories, e.g. "Rent, Phone"
        subcategories: String,
    },

    /// Add a subcategory to a parent
    #[command(name = "add-sub")]
    AddSub {
        /// Parent name
        parent: String,
        /// Subcategory name
        name: String,
    },

    /// Replace all subcategories of a parent
    #[command(name = "set-subs")]
    SetSubs {
        /// Parent name
        parent: String,
        /// Comma-separated subcategories
        subcategories: String,
    },

    /// Rename a parent category
    #[command(name = "rename-parent")]
    RenameParent {
        /// Current name
        parent: String,
        /// New name
        new_name: String,
    },

    /// Remove a parent and all its subcategories
    #[command(name = "remove-parent")]
    RemoveParent {
        /// Parent name
        parent: String,
    },

    /// Remove one subcategory
    #[command(name = "remove-sub")]
    RemoveSub {
        /// Parent name
        parent: String,
        /// Subcategory name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { flat } => {
            if flat {
                print!("{}", format_flat_categories(&service.flat()?));
            } else {
                print!("{}", format_category_tree(&service.list()?));
            }
        }

        CategoryCommands::AddParent { name, subcategories } => {
            let group = service.add_parent(&name, &subcategories)?;
            println!(
                "Added '{}' with: {}",
                group.name,
                group.subcategories.join(", ")
            );
        }

        CategoryCommands::AddSub { parent, name } => {
            service.add_subcategory(&parent, &name)?;
            println!("Added '{}' to '{}'", name.trim(), parent);
        }

        CategoryCommands::SetSubs {
            parent,
            subcategories,
        } => {
            service.set_subcategories(&parent, &subcategories)?;
            println!("Updated subcategories of '{}'", parent);
        }

        CategoryCommands::RenameParent { parent, new_name } => {
            service.rename_parent(&parent, &new_name)?;
            println!("Renamed '{}' to '{}'", parent, new_name.trim());
        }

        CategoryCommands::RemoveParent { parent } => {
            let removed = service.remove_parent(&parent)?;
            println!(
                "Removed '{}' and {} subcategor{}",
                removed.name,
                removed.subcategories.len(),
                if removed.subcategories.len() == 1 { "y" } else { "ies" }
            );
        }

        CategoryCommands::RemoveSub { parent, name } => {
            service.remove_subcategory(&parent, &name)?;
            println!("Removed '{}' from '{}'", name, parent);
        }
    }

    Ok(())
}
