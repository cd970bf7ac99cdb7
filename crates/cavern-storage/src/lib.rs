//! Key/value persistence for high scores and player preferences.
//!
//! [`Storage`] is the logical read/write contract. [`FileStorage`] keeps one
//! file per key in a data directory; [`MemoryStorage`] keeps values in memory
//! and can simulate an unavailable backend.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Logical key/value store. Values are opaque strings.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
