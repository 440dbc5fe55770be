//! Import CLI command
//!
//! Imports one or more bank CSV exports.

use std::path::PathBuf;

use clap::Args;
use log::error;

use crate::config::Settings;
use crate::display::format_import_result;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::TransactionType;
use crate::services::ImportService;
use crate::storage::Storage;

/// Arguments of `expense import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV files to import (date, description, amount; no header)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat every file as this type instead of guessing from its name
    #[arg(short = 't', long = "type")]
    pub transaction_type: Option<TransactionType>,
}

/// Handle the import command
///
/// Each file is imported independently; a failing file does not stop the
/// others.
pub fn handle_import_command(storage: &Storage, settings: &Settings, args: ImportArgs) -> ExpenseResult<()> {
    let service = ImportService::new(storage, settings);
    let mut failed = 0;

    for path in &args.files {
        match service.import_file(path, args.transaction_type) {
            Ok(result) => print!("{}", format_import_result(path, &result)),
            Err(e) => {
                error!("import of {} failed: {}", path.display(), e);
                eprintln!("Error importing {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(ExpenseError::Import(format!(
            "{} of {} file(s) failed to import",
            failed,
            args.files.len()
        )));
    }
    Ok(())
}
