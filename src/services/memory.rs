//! Category memory service
//!
//! Direct inspection and editing of the learned description -> category map.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::CategoryMemory;
use crate::storage::Storage;

/// Service for the learned category memory
pub struct MemoryService<'a> {
    storage: &'a Storage,
}

impl<'a> MemoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All entries sorted by key
    pub fn list(&self) -> ExpenseResult<Vec<(String, String)>> {
        let memory = self.storage.memory.get()?;
        Ok(memory
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    /// The raw memory
    pub fn get(&self) -> ExpenseResult<CategoryMemory> {
        self.storage.memory.get()
    }

    /// Point a key at a category; returns the normalized key
    pub fn set(&self, key: &str, category: &str) -> ExpenseResult<String> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ExpenseError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        let key = self
            .storage
            .memory
            .update(|memory| memory.set(key, category))?
            .ok_or_else(|| ExpenseError::Validation("Memory key cannot be empty".into()))?;
        self.storage.memory.save()?;
        Ok(key)
    }

    /// Remove one key, returning the category it pointed to
    pub fn forget(&self, key: &str) -> ExpenseResult<String> {
        let normalized = key
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let removed = self
            .storage
            .memory
            .update(|memory| memory.remove(&normalized))?
            .ok_or_else(|| ExpenseError::NotFound {
                entity_type: "Memory key",
                identifier: key.to_string(),
            })?;
        self.storage.memory.save()?;
        Ok(removed)
    }

    /// Drop every entry, returning how many there were
    pub fn clear(&self) -> ExpenseResult<usize> {
        let count = self.storage.memory.update(|memory| {
            let count = memory.len();
            memory.clear();
            count
        })?;
        self.storage.memory.save()?;
        Ok(count)
    }
}
