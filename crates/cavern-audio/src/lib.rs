//! Audio collaborator contract and music/ambient arbitration.
//!
//! The game never talks to an audio device directly. It issues fire-and-forget
//! commands to an [`AudioSink`]; the [`AudioDirector`] decides which of level
//! music or biome ambience is audible and persists the player's choice.

mod director;
mod sink;

pub use director::{AudioDirector, MUSIC_ENABLED_KEY};
pub use sink::{AudioSink, NullSink, TracingSink};

/// Sound keys used by the session.
pub mod cues {
    /// Collectible pickup.
    pub const DING: &str = "ding";
    /// Life lost.
    pub const DIE: &str = "die";
    /// Looping level music.
    pub const LEVEL_MUSIC: &str = "level-music";
}
