//! Configuration system for Cavern Miner.
//!
//! Session tuning, movement constants, audio volumes, input overrides and
//! debug switches persist to disk as a RON file. CLI flags override the
//! loaded values, and missing sections fall back to defaults so older config
//! files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AudioConfig, Config, DebugConfig, InputConfig, MovementConfig, SessionConfig, StorageConfig,
    default_config_dir,
};
pub use error::ConfigError;
