//! CLI commands for data export
//!
//! Monthly CSV exports into the exports directory, and full data dumps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{csv, json, yaml};
use crate::models::{MonthKey, TransactionType};
use crate::storage::Storage;

/// Full export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export a month's transactions to the exports directory
    Month {
        /// Month as YYYY-MM
        month: MonthKey,
        /// Only credit or debit rows
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
    },

    /// List exported files
    List,

    /// Delete an exported file
    Delete {
        /// File name as shown by 'export list'
        name: String,
    },

    /// Export all data to a file
    Full {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> ExpenseResult<()> {
    match cmd {
        ExportCommands::Month {
            month,
            transaction_type,
        } => {
            let (path, count) = csv::export_month_to_file(storage, month, transaction_type)?;
            println!("Exported {} transaction(s) to: {}", count, path.display());
        }

        ExportCommands::List => {
            let files = csv::list_exports(storage.paths())?;
            if files.is_empty() {
                println!("No exported files.");
            } else {
                for file in files {
                    println!("{:<40} {:>8} bytes", file.name, file.size);
                }
            }
        }

        ExportCommands::Delete { name } => {
            let path = csv::delete_export(storage.paths(), &name)?;
            println!("Deleted {}", path.display());
        }

        ExportCommands::Full {
            output,
            format,
            pretty,
        } => handle_export_full(storage, output, format, pretty)?,
    }

    Ok(())
}

/// Handle full export
fn handle_export_full(
    storage: &Storage,
    output: PathBuf,
    format: ExportFormat,
    pretty: bool,
) -> ExpenseResult<()> {
    let file = File::create(&output).map_err(|e| {
        ExpenseError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
        ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    println!("Full data exported to: {}", output.display());
    Ok(())
}
