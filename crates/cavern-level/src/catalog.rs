//! Ordered level catalog with RON manifest loading.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::builtin;
use crate::definition::LevelDefinition;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned when building a catalog.
#[derive(Debug, Error)]
pub enum LevelError {
    /// I/O error reading the manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// The manifest lists no levels.
    #[error("catalog has no levels")]
    Empty,

    /// A level without platforms.
    #[error("level '{0}' has no platforms")]
    NoPlatforms(String),

    /// A level without collectibles.
    #[error("level '{0}' has no collectibles")]
    NoCollectibles(String),

    /// A level without enemies.
    #[error("level '{0}' has no enemies")]
    NoEnemies(String),

    /// A platform segment whose width is not positive.
    #[error("level '{level}': platform {index} has non-positive width")]
    NonPositiveWidth {
        /// Level name.
        level: String,
        /// Index of the offending segment.
        index: usize,
    },

    /// An entity placed at a negative coordinate.
    #[error("level '{level}': {what} at negative coordinate")]
    NegativeCoordinate {
        /// Level name.
        level: String,
        /// Entity kind.
        what: &'static str,
    },
}

/// RON manifest listing levels in play order.
#[derive(Debug, Deserialize)]
pub struct LevelManifest {
    /// Levels, first to last.
    pub levels: Vec<LevelDefinition>,
}

// ---------------------------------------------------------------------------
// LevelCatalog
// ---------------------------------------------------------------------------

/// Ordered, validated list of levels. Order is play order.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelCatalog {
    /// The builtin campaign.
    pub fn builtin() -> Self {
        Self {
            levels: builtin::levels(),
        }
    }

    /// Catalog from explicit definitions.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Empty`] for an empty list, or the first
    /// validation failure.
    pub fn from_levels(levels: Vec<LevelDefinition>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Load a catalog from a RON manifest string.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] on parse or validation failures.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, LevelError> {
        let manifest: LevelManifest = ron::from_str(ron_str)?;
        let catalog = Self::from_levels(manifest.levels)?;
        info!("Loaded {} levels from manifest", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a RON manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] on I/O, parse, or validation failures.
    pub fn from_ron(path: &Path) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Every level in play order.
    pub fn all(&self) -> &[LevelDefinition] {
        &self.levels
    }

    /// Level at `index`.
    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether `index` is the final level.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }
}
