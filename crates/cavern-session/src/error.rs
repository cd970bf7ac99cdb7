//! Session error types.

use thiserror::Error;

/// Errors returned by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A level index outside the catalog.
    #[error("invalid level index {index} (catalog has {count} levels)")]
    InvalidLevelIndex {
        /// Requested index.
        index: usize,
        /// Number of levels in the catalog.
        count: usize,
    },

    /// A name was submitted while no qualifying score is awaiting entry.
    #[error("no high score is awaiting a name")]
    NoPendingHighScore,
}
