//! Storage initialization
//!
//! Handles first-run setup and default data creation

use log::info;

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{CategoryMemory, CategoryStructure};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the data directories, the starter category taxonomy and an empty
/// category memory. Existing files are left alone.
pub fn initialize_storage(paths: &ExpensePaths) -> Result<(), ExpenseError> {
    paths.ensure_directories()?;

    if !paths.category_structure_file().exists() {
        info!("creating starter category taxonomy");
        write_json_atomic(paths.category_structure_file(), &CategoryStructure::starter())?;
    }

    if !paths.category_map_file().exists() {
        write_json_atomic(paths.category_map_file(), &CategoryMemory::new())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.category_structure_file().exists()
}
