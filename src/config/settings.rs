//! User settings for the expense manager
//!
//! Manages user preferences: the currency symbol and the knobs of the
//! auto-categorizer (keyword rules, fallback category, memory key length).

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::categorizer::{default_keyword_rules, KeywordRule, FALLBACK_CATEGORY};
use crate::error::ExpenseError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How many leading description words form a category memory key
    #[serde(default = "default_memory_key_words")]
    pub memory_key_words: usize,

    /// Category assigned when neither memory nor rules match
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    /// Ordered keyword rules, first match wins
    #[serde(default = "default_keyword_rules")]
    pub keyword_rules: Vec<KeywordRule>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_memory_key_words() -> usize {
    2
}

fn default_fallback_category() -> String {
    FALLBACK_CATEGORY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            memory_key_words: default_memory_key_words(),
            fallback_category: default_fallback_category(),
            keyword_rules: default_keyword_rules(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the categorizer cannot work with
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.memory_key_words == 0 {
            return Err(ExpenseError::Config(
                "memory_key_words must be at least 1".into(),
            ));
        }
        if self.fallback_category.trim().is_empty() {
            return Err(ExpenseError::Config(
                "fallback_category cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
