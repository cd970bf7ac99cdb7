//! Cavern Miner headless runner.
//!
//! Loads the config, applies CLI overrides, wires the session to file-backed
//! storage and logging collaborators, and lets the autopilot play through the
//! level catalog. Custom level and biome manifests can be supplied as RON.
//!
//! Run with: `cargo run -p cavern-game -- --name ACE`

mod autoplay;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use cavern_audio::{AudioDirector, TracingSink};
use cavern_biome::{BiomeRegistry, BiomeStage, HeadlessEffects};
use cavern_config::{CliArgs, Config, default_config_dir};
use cavern_input::Bindings;
use cavern_level::LevelCatalog;
use cavern_session::{HighScoreTable, SessionServices, SessionStateMachine};
use cavern_storage::FileStorage;
use clap::Parser;
use tracing::info;

use crate::autoplay::{Autopilot, run_autoplay};
use crate::error::GameError;

/// CLI arguments for the game binary.
#[derive(Parser, Debug)]
#[command(name = "cavern-miner", about = "Cavern Miner, headless autoplay")]
struct GameArgs {
    #[command(flatten)]
    config: CliArgs,

    /// Name entered if the run makes the high score table.
    #[arg(long, default_value = "AUTO")]
    name: String,

    /// Stop after this many simulated frames.
    #[arg(long, default_value_t = 216_000)]
    max_frames: u64,

    /// RON level manifest replacing the builtin catalog.
    #[arg(long)]
    levels: Option<PathBuf>,

    /// RON biome manifest registered on top of the builtin biomes.
    #[arg(long)]
    biomes: Option<PathBuf>,

    /// Make the autopilot hit a hazard once on this level index.
    #[arg(long)]
    hazard_level: Option<usize>,
}

fn main() -> ExitCode {
    let args = GameArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("cavern-miner: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: GameArgs) -> Result<(), GameError> {
    let config_dir = args.config.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args.config);
    config.validate()?;

    let data_dir = config.storage.resolve_data_dir();
    cavern_log::init_logging(
        Some(&data_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!("Cavern Miner");
    info!("  config: {}", config_dir.display());
    info!("  data:   {}", data_dir.display());

    let mut registry = BiomeRegistry::builtin();
    if let Some(path) = &args.biomes {
        let count = registry.register_from_ron(path)?;
        info!("Registered {count} biomes from {}", path.display());
    }
    let catalog = match &args.levels {
        Some(path) => LevelCatalog::from_ron(path)?,
        None => LevelCatalog::builtin(),
    };

    let services = SessionServices {
        stage: BiomeStage::new(registry, Box::new(HeadlessEffects::new())),
        audio: AudioDirector::new(
            Box::new(TracingSink),
            Box::new(FileStorage::new(&data_dir)),
            config.audio.clone(),
        ),
        high_scores: HighScoreTable::new(Box::new(FileStorage::new(&data_dir))),
    };
    let mut session = SessionStateMachine::new(&config, catalog, services)?;

    let mut bindings = Bindings::default();
    bindings.apply_overrides(&config.input.keybindings);
    let mut pilot = Autopilot::new(bindings);
    if let Some(index) = args.hazard_level {
        pilot = pilot.with_hazard_on(index);
    }

    let summary = run_autoplay(&mut session, &mut pilot, &args.name, args.max_frames)?;
    info!(
        "Run finished after {} frames: {} levels, {} lives lost, score {}",
        summary.frames, summary.levels_completed, summary.lives_lost, summary.score
    );

    for (rank, entry) in session.high_scores().high_scores().iter().enumerate() {
        info!("{:>2}. {} {:>6}", rank + 1, entry.name, entry.score);
    }
    Ok(())
}
