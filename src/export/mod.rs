//! Export module for the expense manager
//!
//! Provides data export in multiple formats:
//! - CSV: one month of transactions (spreadsheet-compatible)
//! - JSON: machine-readable full data export
//! - YAML: human-readable full data export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{
    delete_export, export_month_csv, export_month_to_file, list_exports, month_export_file_name,
    ExportFile,
};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
