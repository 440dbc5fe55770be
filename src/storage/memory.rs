//! Category memory repository
//!
//! Manages loading and saving learned description prefixes to
//! category_map.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::CategoryMemory;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the learned category memory
pub struct MemoryRepository {
    path: PathBuf,
    data: RwLock<CategoryMemory>,
}

impl MemoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(CategoryMemory::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let memory: CategoryMemory = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = memory;
        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Snapshot of the current memory
    pub fn get(&self) -> Result<CategoryMemory, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Mutate the in-memory map
    pub fn update<F, T>(&self, edit: F) -> Result<T, ExpenseError>
    where
        F: FnOnce(&mut CategoryMemory) -> T,
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(edit(&mut data))
    }

    pub fn len(&self) -> Result<usize, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
