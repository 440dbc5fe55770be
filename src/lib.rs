//! Expense Manager - personal finance tracking from bank CSV exports
//!
//! This library provides the core functionality of the `expense` command.
//! Bank exports are parsed into transactions, auto-categorized by keyword
//! rules and a learned memory, and kept in month-keyed JSON files alongside
//! the category taxonomy and monthly income/balance dashboards.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, dashboards, etc.)
//! - `categorizer`: Description-based auto-categorization
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (CSV import included)
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_manager::config::{paths::ExpensePaths, settings::Settings};
//! use expense_manager::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod categorizer;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
