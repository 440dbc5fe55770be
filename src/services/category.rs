//! Category service
//!
//! Provides business logic for editing the parent/subcategory taxonomy.
//! Every edit is validated by the model and persisted immediately.

use log::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_subcategory_list, CategoryGroup, CategoryStructure};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The full taxonomy
    pub fn structure(&self) -> ExpenseResult<CategoryStructure> {
        self.storage.categories.get()
    }

    /// Parents with their subcategories, in display order
    pub fn list(&self) -> ExpenseResult<Vec<CategoryGroup>> {
        Ok(self.storage.categories.get()?.groups().to_vec())
    }

    /// Every subcategory in parent order
    pub fn flat(&self) -> ExpenseResult<Vec<String>> {
        self.storage.categories.flat()
    }

    /// Add a parent category from comma-separated subcategory input
    pub fn add_parent(&self, name: &str, subcategories: &str) -> ExpenseResult<CategoryGroup> {
        let name = name.trim();
        let subs = parse_subcategory_list(subcategories);
        self.storage
            .categories
            .update(|structure| structure.add_parent(name, subs))?;
        self.storage.categories.save()?;
        info!("added parent category '{}'", name);

        self.storage
            .categories
            .get()?
            .get(name)
            .cloned()
            .ok_or_else(|| ExpenseError::parent_not_found(name))
    }

    /// Add one subcategory under an existing parent
    pub fn add_subcategory(&self, parent: &str, name: &str) -> ExpenseResult<()> {
        self.storage
            .categories
            .update(|structure| structure.add_subcategory(parent, name))?;
        self.storage.categories.save()
    }

    /// Replace all subcategories of a parent
    pub fn set_subcategories(&self, parent: &str, subcategories: &str) -> ExpenseResult<()> {
        let subs = parse_subcategory_list(subcategories);
        self.storage
            .categories
            .update(|structure| structure.set_subcategories(parent, subs))?;
        self.storage.categories.save()
    }

    pub fn rename_parent(&self, parent: &str, new_name: &str) -> ExpenseResult<()> {
        self.storage
            .categories
            .update(|structure| structure.rename_parent(parent, new_name))?;
        self.storage.categories.save()
    }

    /// Remove a parent and its subcategories
    ///
    /// Transactions keep whatever category name they already carry.
    pub fn remove_parent(&self, parent: &str) -> ExpenseResult<CategoryGroup> {
        let removed = self
            .storage
            .categories
            .update(|structure| structure.remove_parent(parent))?;
        self.storage.categories.save()?;
        info!(
            "removed parent category '{}' ({} subcategories)",
            removed.name,
            removed.subcategories.len()
        );
        Ok(removed)
    }

    pub fn remove_subcategory(&self, parent: &str, name: &str) -> ExpenseResult<()> {
        self.storage
            .categories
            .update(|structure| structure.remove_subcategory(parent, name))?;
        self.storage.categories.save()
    }
}
