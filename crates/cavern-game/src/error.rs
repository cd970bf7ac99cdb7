//! Errors that abort a run.

use cavern_biome::BiomeError;
use cavern_config::ConfigError;
use cavern_level::LevelError;
use cavern_session::SessionError;
use thiserror::Error;

/// Startup and run failures of the game binary.
#[derive(Debug, Error)]
pub enum GameError {
    /// The config file could not be loaded or created.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// A custom level manifest was rejected.
    #[error("levels: {0}")]
    Level(#[from] LevelError),

    /// A custom biome manifest was rejected.
    #[error("biomes: {0}")]
    Biome(#[from] BiomeError),

    /// The session could not start or refused a command.
    #[error("session: {0}")]
    Session(#[from] SessionError),
}
