//! Description-based auto-categorization
//!
//! A description is matched, in order, against:
//!
//! 1. the learned [`CategoryMemory`] (a remembered prefix anywhere in the
//!    description),
//! 2. the ordered keyword rules (first rule with any keyword contained in
//!    the lowercased description),
//! 3. the fallback category.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::CategoryMemory;

/// Category used when nothing else matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// One keyword rule: any keyword as a substring assigns the category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// The first keyword found in an already-lowercased description
    fn matching_keyword(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|k| !k.is_empty() && lowered.contains(&k.to_lowercase()))
    }
}

/// The built-in rule table
pub fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("Groceries", &["grocery", "walmart", "food"]),
        KeywordRule::new("Public Transportation", &["uber", "lyft", "taxi", "bus", "presto"]),
        KeywordRule::new("Dining Out", &["restaurant", "cafe", "tim hortons", "starbucks"]),
        KeywordRule::new("Rent", &["rent", "mortgage", "landlord"]),
        KeywordRule::new("Subscriptions", &["netflix", "spotify", "subscription"]),
        KeywordRule::new("Phone", &["phone", "internet", "wifi"]),
        KeywordRule::new(
            "Other Fees",
            &["electronic funds transfer", "preauthorized debit"],
        ),
    ]
}

/// Why a category was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySource {
    /// A learned memory entry matched
    Memory,
    /// A keyword rule matched on this keyword
    Rule(String),
    Fallback,
}

/// Result of categorizing one description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorization {
    pub category: String,
    pub source: CategorySource,
}

/// Categorizer bound to a memory snapshot and a rule table
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<KeywordRule>,
    fallback: String,
    memory: CategoryMemory,
}

impl Categorizer {
    pub fn new(rules: Vec<KeywordRule>, fallback: impl Into<String>, memory: CategoryMemory) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
            memory,
        }
    }

    /// Built-in rules and fallback with the given memory
    pub fn with_memory(memory: CategoryMemory) -> Self {
        Self::new(default_keyword_rules(), FALLBACK_CATEGORY, memory)
    }

    /// Rules and fallback taken from user settings
    pub fn from_settings(settings: &Settings, memory: CategoryMemory) -> Self {
        Self::new(
            settings.keyword_rules.clone(),
            settings.fallback_category.clone(),
            memory,
        )
    }

    pub fn memory(&self) -> &CategoryMemory {
        &self.memory
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Categorize a description and report which stage decided
    pub fn classify(&self, description: &str) -> Categorization {
        if let Some(category) = self.memory.lookup(description) {
            return Categorization {
                category: category.to_string(),
                source: CategorySource::Memory,
            };
        }

        let lowered = description.to_lowercase();
        for rule in &self.rules {
            if let Some(keyword) = rule.matching_keyword(&lowered) {
                return Categorization {
                    category: rule.category.clone(),
                    source: CategorySource::Rule(keyword.to_string()),
                };
            }
        }

        Categorization {
            category: self.fallback.clone(),
            source: CategorySource::Fallback,
        }
    }

    /// Categorize a description
    pub fn categorize(&self, description: &str) -> String {
        self.classify(description).category
    }
}

/// Categorize with the built-in rules against a memory map
pub fn categorize(description: &str, memory: &CategoryMemory) -> String {
    Categorizer::with_memory(memory.clone()).categorize(description)
}
