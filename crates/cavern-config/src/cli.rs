//! Command-line argument parsing for Cavern Miner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Cavern Miner command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "cavern-miner", about = "Cavern Miner")]
pub struct CliArgs {
    /// Level index to start on (0-based).
    #[arg(long)]
    pub start_level: Option<usize>,

    /// Number of lives at session start.
    #[arg(long)]
    pub lives: Option<u32>,

    /// Never decrement lives.
    #[arg(long)]
    pub unlimited_lives: bool,

    /// Ignore enemy, hazard and air losses.
    #[arg(long)]
    pub no_collision: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for high scores and preferences.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = args.start_level {
            self.session.start_level = level;
        }
        if let Some(lives) = args.lives {
            self.session.max_lives = lives;
        }
        if args.unlimited_lives {
            self.debug.unlimited_lives = true;
        }
        if args.no_collision {
            self.debug.collision_enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.data_dir {
            self.storage.data_dir = Some(dir.clone());
        }
    }
}
