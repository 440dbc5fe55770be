//! Learned category memory
//!
//! Maps a normalized description prefix (the first few lowercase words) to
//! the category the user last chose for it. The categorizer consults the
//! memory before any keyword rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized description prefix -> category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMemory {
    entries: BTreeMap<String, String>,
}

impl CategoryMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the memory key for a description
    ///
    /// Lowercases, splits on whitespace and joins the first `words` tokens
    /// with single spaces. Returns `None` for blank descriptions.
    pub fn key_for(description: &str, words: usize) -> Option<String> {
        let lower = description.to_lowercase();
        let key = lower
            .split_whitespace()
            .take(words.max(1))
            .collect::<Vec<_>>()
            .join(" ");
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Find the remembered category for a description
    ///
    /// A key matches when it occurs anywhere in the lowercased description.
    /// The longest matching key wins; equal lengths fall back to key order.
    pub fn lookup(&self, description: &str) -> Option<&str> {
        let desc = description.to_lowercase();
        let mut best: Option<(&String, &String)> = None;
        for (key, category) in &self.entries {
            if key.is_empty() || !desc.contains(key.as_str()) {
                continue;
            }
            match best {
                Some((best_key, _)) if best_key.len() >= key.len() => {}
                _ => best = Some((key, category)),
            }
        }
        best.map(|(_, category)| category.as_str())
    }

    /// Remember the category chosen for a description
    ///
    /// Returns the key that was written, or `None` if the description was
    /// blank.
    pub fn learn(&mut self, description: &str, category: &str, words: usize) -> Option<String> {
        let key = Self::key_for(description, words)?;
        self.entries.insert(key.clone(), category.to_string());
        Some(key)
    }

    /// Set a key directly; the key is normalized like a description
    pub fn set(&mut self, key: &str, category: &str) -> Option<String> {
        let key = key
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if key.is_empty() {
            return None;
        }
        self.entries.insert(key.clone(), category.to_string());
        Some(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for() {
        assert_eq!(
            CategoryMemory::key_for("  TIM   Hortons #123 Toronto", 2).as_deref(),
            Some("tim hortons")
        );
        assert_eq!(CategoryMemory::key_for("AMAZON", 2).as_deref(), Some("amazon"));
        assert_eq!(CategoryMemory::key_for("a b c d", 3).as_deref(), Some("a b c"));
        assert_eq!(CategoryMemory::key_for("   ", 2), None);
    }

    #[test]
    fn test_learn_and_lookup() {
        let mut memory = CategoryMemory::new();
        memory.learn("COSTCO WHOLESALE #55", "Groceries", 2);

        assert_eq!(memory.lookup("costco wholesale #12 ottawa"), Some("Groceries"));
        assert_eq!(memory.lookup("COSTCO GAS"), None);
    }

    #[test]
    fn test_longest_key_wins() {
        let mut memory = CategoryMemory::new();
        memory.set("amazon", "Shopping");
        memory.set("amazon prime", "Subscriptions");

        assert_eq!(memory.lookup("AMAZON PRIME*2K3"), Some("Subscriptions"));
        assert_eq!(memory.lookup("AMAZON.CA ORDER"), Some("Shopping"));
    }

    #[test]
    fn test_equal_length_keys_pick_first_alphabetically() {
        let mut memory = CategoryMemory::new();
        memory.set("zz", "Z");
        memory.set("aa", "A");

        assert_eq!(memory.lookup("xx zz aa"), Some("A"));
        assert_eq!(memory.lookup("zz only"), Some("Z"));
    }

    #[test]
    fn test_set_normalizes_key() {
        let mut memory = CategoryMemory::new();
        assert_eq!(memory.set("  Shell   Canada ", "Gas").as_deref(), Some("shell canada"));
        assert_eq!(memory.get("shell canada"), Some("Gas"));
        assert_eq!(memory.set("  ", "Gas"), None);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut memory = CategoryMemory::new();
        memory.set("uber trip", "Public Transportation");
        let json = serde_json::to_string(&memory).unwrap();
        assert_eq!(json, r#"{"uber trip":"Public Transportation"}"#);
    }
}
