//! In-memory storage, also able to act as an unavailable backend.

use std::collections::HashMap;

use crate::{Storage, StorageError};

/// Keeps values in a `HashMap`. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    /// Creates an empty, working store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every operation fails with [`StorageError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable("memory store disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.remove(key);
        Ok(())
    }
}
