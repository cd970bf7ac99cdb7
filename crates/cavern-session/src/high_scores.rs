//! Persisted top-ten high score table.

use cavern_storage::Storage;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Storage key of the serialized table.
pub const HIGH_SCORES_KEY: &str = "high_scores";

/// Entries kept in the table.
pub const MAX_HIGH_SCORES: usize = 10;

const NAME_LEN: usize = 4;

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Four-character uppercase code.
    pub name: String,
    /// Final score.
    pub score: u32,
}

impl HighScoreEntry {
    /// Entry with `name` normalized by [`HighScoreTable::format_name`].
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: HighScoreTable::format_name(name),
            score,
        }
    }
}

/// High score table backed by a [`Storage`]. Storage failures are logged and
/// never surface to the caller.
pub struct HighScoreTable {
    storage: Box<dyn Storage>,
}

impl HighScoreTable {
    /// Table persisted in `storage`.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Uppercase, truncate to four characters and pad with `_`.
    pub fn format_name(name: &str) -> String {
        let mut code: String = name.to_uppercase().chars().take(NAME_LEN).collect();
        while code.chars().count() < NAME_LEN {
            code.push('_');
        }
        code
    }

    /// Table shown when nothing has been stored yet.
    pub fn default_scores() -> Vec<HighScoreEntry> {
        [
            ("WILY", 10000),
            ("EUGN", 9000),
            ("KONG", 8000),
            ("SKYL", 7000),
            ("VAT_", 6000),
            ("SOLR", 5000),
            ("ORE_", 4000),
            ("AIR_", 3000),
            ("PICK", 2000),
            ("MINE", 1000),
        ]
        .into_iter()
        .map(|(name, score)| HighScoreEntry {
            name: name.to_string(),
            score,
        })
        .collect()
    }

    /// Stored table, sorted descending. Falls back to
    /// [`default_scores`](Self::default_scores) when nothing is stored or the
    /// stored value cannot be read.
    pub fn high_scores(&self) -> Vec<HighScoreEntry> {
        let stored = match self.storage.read(HIGH_SCORES_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return Self::default_scores(),
            Err(e) => {
                warn!("Failed to load high scores: {e}");
                return Self::default_scores();
            }
        };
        match ron::from_str::<Vec<HighScoreEntry>>(&stored) {
            Ok(mut scores) => {
                scores.sort_by(|a, b| b.score.cmp(&a.score));
                scores.truncate(MAX_HIGH_SCORES);
                scores
            }
            Err(e) => {
                warn!("Stored high scores are corrupt: {e}");
                Self::default_scores()
            }
        }
    }

    /// Insert a score and persist the table. Returns whether the entry made
    /// the top ten.
    pub fn save_score(&mut self, name: &str, score: u32) -> bool {
        let mut scores = self.high_scores();
        // After existing entries with an equal score.
        let position = scores.iter().take_while(|e| e.score >= score).count();
        scores.insert(position, HighScoreEntry::new(name, score));
        scores.truncate(MAX_HIGH_SCORES);
        let made_table = position < MAX_HIGH_SCORES;

        match ron::to_string(&scores) {
            Ok(serialized) => {
                if let Err(e) = self.storage.write(HIGH_SCORES_KEY, &serialized) {
                    warn!("Failed to save high scores: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize high scores: {e}"),
        }
        if made_table {
            info!("High score {score} entered at rank {}", position + 1);
        }
        made_table
    }

    /// Whether `score` would enter the table.
    pub fn is_high_score(&self, score: u32) -> bool {
        let scores = self.high_scores();
        match scores.last() {
            Some(lowest) if scores.len() >= MAX_HIGH_SCORES => score > lowest.score,
            _ => true,
        }
    }

    /// 1-based rank `score` would take: one more than the number of entries
    /// scoring at least as much.
    pub fn rank(&self, score: u32) -> usize {
        1 + self
            .high_scores()
            .iter()
            .take_while(|e| e.score >= score)
            .count()
    }

    /// Remove the stored table.
    pub fn clear(&mut self) {
        if let Err(e) = self.storage.remove(HIGH_SCORES_KEY) {
            warn!("Failed to clear high scores: {e}");
        }
    }
}
