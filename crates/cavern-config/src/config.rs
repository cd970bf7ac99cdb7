//! Configuration structs with gameplay defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "cavern-miner";

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Lives, air, scoring and timing rules of a play session.
    pub session: SessionConfig,
    /// Player movement tuning.
    pub movement: MovementConfig,
    /// Audio settings.
    pub audio: AudioConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Persistence settings.
    pub storage: StorageConfig,
}

/// Session rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives granted at session start and on restart.
    pub max_lives: u32,
    /// Air at the start of every level load.
    pub starting_air: f32,
    /// Air drained per second before the biome multiplier is applied.
    pub air_drain_per_second: f32,
    /// Points awarded per collectible.
    pub collectible_score: u32,
    /// Air restored per capsule.
    pub capsule_air: f32,
    /// Distance in pixels at which the player reaches a visible exit.
    pub exit_radius: f32,
    /// Seconds between winning a level and loading the next one.
    pub level_transition_secs: f32,
    /// Seconds after entering a pending state during which acknowledgement is ignored.
    pub input_suppression_secs: f32,
    /// Level index the session starts on.
    pub start_level: usize,
}

/// Player movement tuning, in pixels and pixels per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed on normal surfaces.
    pub walk_speed: f32,
    /// Upward launch speed of a jump.
    pub jump_velocity: f32,
    /// Top speed reachable while sliding on slippery surfaces.
    pub slide_max_speed: f32,
    /// Velocity gained per tick while pushing on a slippery surface.
    pub slide_acceleration: f32,
    /// Multiplicative velocity decay per tick after releasing input on a slippery surface.
    pub slide_decay: f32,
    /// Below this speed a sliding player snaps to a full stop.
    pub stop_epsilon: f32,
    /// Surfaces with friction below this value use the slippery regime.
    pub slippery_threshold: f32,
    /// Width of one platform brick.
    pub brick_span: f32,
}

/// Audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0).
    pub master_volume: f32,
    /// Level music volume (0.0 - 1.0).
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0).
    pub sfx_volume: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (key name -> signal name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Enemy, hazard and air-exhaustion losses are applied.
    pub collision_enabled: bool,
    /// Losing a life does not decrement the counter.
    pub unlimited_lives: bool,
    /// The in-game level skip menu can be opened.
    pub debug_menu: bool,
}

/// Persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for high scores and preferences. `None` uses the platform data dir.
    pub data_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_lives: 3,
            starting_air: 100.0,
            air_drain_per_second: 2.0,
            collectible_score: 100,
            capsule_air: 20.0,
            exit_radius: 30.0,
            level_transition_secs: 2.0,
            input_suppression_secs: 0.5,
            start_level: 0,
        }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 200.0,
            jump_velocity: 500.0,
            slide_max_speed: 280.0,
            slide_acceleration: 12.0,
            slide_decay: 0.96,
            stop_epsilon: 5.0,
            slippery_threshold: 0.5,
            brick_span: 32.0,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 0.4,
            sfx_volume: 0.6,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            collision_enabled: true,
            unlimited_lives: false,
            debug_menu: true,
        }
    }
}

impl StorageConfig {
    /// Directory that holds persisted game data.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_NAME)
        })
    }
}

/// Platform config directory for the game, falling back to the temp dir.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
}

/// Narrowest platform brick the level builder accepts.
const MIN_BRICK_SPAN: f32 = 1.0;

// --- Load / Save / Validate ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join("config.ron");
        let write_error = |source| ConfigError::Write {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Reject values that would stall or corrupt a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let span = self.movement.brick_span;
        if !span.is_finite() || span < MIN_BRICK_SPAN {
            return Err(ConfigError::Invalid {
                field: "movement.brick_span",
                value: span.to_string(),
                reason: "must be a finite width of at least one pixel",
            });
        }
        let secs = [
            ("session.level_transition_secs", self.session.level_transition_secs),
            ("session.input_suppression_secs", self.session.input_suppression_secs),
        ];
        for (field, value) in secs {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    value: value.to_string(),
                    reason: "must be a finite, non-negative duration",
                });
            }
        }
        Ok(())
    }
}
