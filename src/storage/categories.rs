//! Category taxonomy repository
//!
//! Manages loading and saving the parent -> subcategory structure to
//! category_structure.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::CategoryStructure;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the category taxonomy
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<CategoryStructure>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(CategoryStructure::new()),
        }
    }

    /// Load the taxonomy from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let structure: CategoryStructure = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = structure;
        Ok(())
    }

    /// Save the taxonomy to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Snapshot of the current taxonomy
    pub fn get(&self) -> Result<CategoryStructure, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Flat list of every subcategory, in display order
    pub fn flat(&self) -> Result<Vec<String>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.flat().into_iter().map(String::from).collect())
    }

    /// Apply an edit to the in-memory taxonomy
    ///
    /// The edit runs against a copy; the stored taxonomy only changes when
    /// the edit succeeds.
    pub fn update<F, T, E>(&self, edit: F) -> Result<T, ExpenseError>
    where
        F: FnOnce(&mut CategoryStructure) -> Result<T, E>,
        E: Into<ExpenseError>,
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut draft = data.clone();
        let out = edit(&mut draft).map_err(Into::into)?;
        *data = draft;
        Ok(out)
    }
}
