//! Configuration module
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence (including categorizer rules)

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
