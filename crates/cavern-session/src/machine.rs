//! Level lifecycle state machine.
//!
//! Playing → LevelTransition → Playing (next level), Playing →
//! LifeLostPending → Playing (same level), Playing → GameOverPending →
//! Terminal, and Playing → GameComplete → Terminal. All timers are countdowns
//! stepped by [`SessionStateMachine::tick`].

use cavern_audio::{AudioDirector, cues};
use cavern_biome::{BiomeId, BiomeProfile, BiomeStage, SurfaceKind};
use cavern_config::{Config, DebugConfig, SessionConfig};
use cavern_input::SignalState;
use cavern_level::{LevelCatalog, LevelDefinition};
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::air::{Air, DRAIN_INTERVAL_SECS};
use crate::debug_menu::{DebugMenu, MenuAction};
use crate::entities::{LevelEntities, Player};
use crate::error::SessionError;
use crate::high_scores::HighScoreTable;
use crate::lives::Lives;
use crate::movement::{SurfaceFrictionResolver, movement_step};

// ---------------------------------------------------------------------------
// Phases and events
// ---------------------------------------------------------------------------

/// Where a finished session goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOutcome {
    /// The score qualifies for the high score table.
    NameEntry {
        /// Final score.
        score: u32,
    },
    /// Back to the title screen.
    Title,
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The level is live.
    Playing,
    /// Level won, waiting out the delay before the next one loads.
    LevelTransition,
    /// A life was lost and some remain. Waits for acknowledgement.
    LifeLostPending,
    /// The last life was lost. Waits for acknowledgement.
    GameOverPending,
    /// The final level was won. Waits for acknowledgement.
    GameComplete,
    /// The session is over.
    Terminal(TerminalOutcome),
}

/// Overlap reported by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameplayEvent {
    /// The player touched collectible `index`.
    CollectiblePicked(usize),
    /// The player touched air capsule `index`.
    CapsulePicked(usize),
    /// The player touched an enemy.
    EnemyContact,
    /// The player touched a hazard tile.
    HazardContact,
}

/// Why a life was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// Enemy contact.
    Enemy,
    /// Hazard contact.
    Hazard,
    /// The air gauge ran out.
    OutOfAir,
}

/// What the presentation layer should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    /// A level was (re)built.
    LevelLoaded {
        /// Catalog index.
        index: usize,
        /// Level name.
        name: String,
        /// Active biome.
        biome: BiomeId,
    },
    /// The exit became visible.
    ExitRevealed,
    /// A collectible was taken.
    ItemCollected {
        /// Score after the pickup.
        score: u32,
        /// Collectibles still in the level.
        remaining: usize,
    },
    /// A capsule was taken.
    AirRestored {
        /// Air after the pickup.
        air: f32,
    },
    /// A life was lost and the level will restart.
    LifeLost {
        /// Lives left.
        lives: u32,
        /// Cause.
        reason: LossReason,
    },
    /// The last life was lost.
    GameOver {
        /// Cause.
        reason: LossReason,
        /// Final score.
        score: u32,
    },
    /// A level other than the last was won.
    LevelComplete {
        /// Catalog index of the won level.
        index: usize,
    },
    /// The last level was won.
    GameComplete {
        /// Final score.
        score: u32,
    },
    /// The session ended.
    Terminal(TerminalOutcome),
    /// The debug menu opened or closed.
    DebugMenuToggled(bool),
}

/// One tick of physics collaborator output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickInput {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Player position after the physics step. `None` keeps the last one.
    pub player_position: Option<Vec2>,
    /// Whether the player stands on something.
    pub grounded: bool,
    /// Surface under the player, if grounded on a brick.
    pub surface: Option<SurfaceKind>,
    /// Overlaps in the order they happened.
    pub events: Vec<GameplayEvent>,
}

impl TickInput {
    /// A tick with nothing happening.
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    /// Report the player at `position`.
    pub fn at(mut self, position: Vec2) -> Self {
        self.player_position = Some(position);
        self
    }

    /// Report the player grounded on `surface`.
    pub fn on(mut self, surface: SurfaceKind) -> Self {
        self.grounded = true;
        self.surface = Some(surface);
        self
    }

    /// Append an overlap.
    pub fn with_event(mut self, event: GameplayEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Development switches. Independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugOverrides {
    /// When false, enemy, hazard and air losses are ignored.
    pub collision_enabled: bool,
    /// When true, losses do not decrement lives.
    pub unlimited_lives: bool,
    /// Whether the level skip menu is available.
    pub debug_menu: bool,
}

impl Default for DebugOverrides {
    fn default() -> Self {
        Self {
            collision_enabled: true,
            unlimited_lives: false,
            debug_menu: false,
        }
    }
}

impl From<&DebugConfig> for DebugOverrides {
    fn from(config: &DebugConfig) -> Self {
        Self {
            collision_enabled: config.collision_enabled,
            unlimited_lives: config.unlimited_lives,
            debug_menu: config.debug_menu,
        }
    }
}

/// Context objects the session drives.
pub struct SessionServices {
    /// Biome registry and active effects.
    pub stage: BiomeStage,
    /// Music, ambient and effects.
    pub audio: AudioDirector,
    /// Persisted high scores.
    pub high_scores: HighScoreTable,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Owns one play-through: the active level, its entities, lives, air and
/// score.
pub struct SessionStateMachine {
    rules: SessionConfig,
    resolver: SurfaceFrictionResolver,
    brick_span: f32,
    catalog: LevelCatalog,
    services: SessionServices,
    overrides: DebugOverrides,
    menu: DebugMenu,

    phase: Phase,
    level_index: usize,
    biome: BiomeProfile,
    entities: LevelEntities,
    generation: u64,
    score: u32,
    lives: Lives,
    air: Air,
    transition_timer: f32,
    suppression_timer: f32,
    pending: Vec<SessionNotice>,
}

impl SessionStateMachine {
    /// Start a session on `config.session.start_level`. The `LevelLoaded`
    /// notice is delivered by the first [`tick`](Self::tick).
    pub fn new(
        config: &Config,
        catalog: LevelCatalog,
        services: SessionServices,
    ) -> Result<Self, SessionError> {
        let start = config.session.start_level;
        let overrides = DebugOverrides::from(&config.debug);

        let mut session = Self {
            rules: config.session.clone(),
            resolver: SurfaceFrictionResolver::new(&config.movement),
            brick_span: config.movement.brick_span,
            catalog,
            services,
            overrides,
            menu: DebugMenu::new(overrides.debug_menu),
            phase: Phase::Playing,
            level_index: start,
            biome: BiomeProfile::neutral(),
            entities: LevelEntities::empty(),
            generation: 0,
            score: 0,
            lives: Lives::new(config.session.max_lives),
            air: Air::new(config.session.starting_air),
            transition_timer: 0.0,
            suppression_timer: 0.0,
            pending: Vec::new(),
        };
        let loaded = session.load_level(start)?;
        session.pending.push(loaded);
        Ok(session)
    }

    // -- Accessors ----------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Points scored this session.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives counter.
    pub fn lives(&self) -> &Lives {
        &self.lives
    }

    /// Air left.
    pub fn air(&self) -> f32 {
        self.air.air()
    }

    /// Catalog index of the active level.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Definition of the active level.
    pub fn current_level(&self) -> Option<&LevelDefinition> {
        self.catalog.get(self.level_index)
    }

    /// Profile of the biome the active level plays under.
    pub fn biome(&self) -> &BiomeProfile {
        &self.biome
    }

    /// Entities of the current load.
    pub fn entities(&self) -> &LevelEntities {
        &self.entities
    }

    /// The player avatar.
    pub fn player(&self) -> &Player {
        &self.entities.player
    }

    /// Whether the final level has been won and is awaiting acknowledgement.
    pub fn is_game_won(&self) -> bool {
        self.phase == Phase::GameComplete
    }

    /// Whether the session has reached a game over, completion or terminal state.
    pub fn is_game_ended(&self) -> bool {
        matches!(
            self.phase,
            Phase::GameOverPending | Phase::GameComplete | Phase::Terminal(_)
        )
    }

    /// Whether a level transition delay is running.
    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::LevelTransition
    }

    /// Whether the debug menu is open.
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Active development switches.
    pub fn debug_overrides(&self) -> DebugOverrides {
        self.overrides
    }

    /// Replace the development switches.
    pub fn set_debug_overrides(&mut self, overrides: DebugOverrides) {
        self.overrides = overrides;
        self.menu.set_enabled(overrides.debug_menu);
    }

    /// The level catalog.
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Biome stage.
    pub fn stage(&self) -> &BiomeStage {
        &self.services.stage
    }

    /// Audio director.
    pub fn audio(&self) -> &AudioDirector {
        &self.services.audio
    }

    /// Mutable audio director, for the music toggle.
    pub fn audio_mut(&mut self) -> &mut AudioDirector {
        &mut self.services.audio
    }

    /// High score table.
    pub fn high_scores(&self) -> &HighScoreTable {
        &self.services.high_scores
    }

    // -- Commands -----------------------------------------------------------

    /// Advance one frame.
    pub fn tick(&mut self, input: &TickInput, signals: &SignalState) -> Vec<SessionNotice> {
        let mut notices = std::mem::take(&mut self.pending);
        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };

        if !matches!(self.phase, Phase::Terminal(_))
            && let Some(action) = self.menu.update(signals)
        {
            match action {
                MenuAction::Toggled(open) => notices.push(SessionNotice::DebugMenuToggled(open)),
                MenuAction::SkipTo(index) => {
                    if let Ok(loaded) = self.skip_to_level(index) {
                        notices.push(loaded);
                        return notices;
                    }
                }
            }
        }

        match self.phase {
            Phase::Playing => self.tick_playing(dt, input, signals, &mut notices),
            Phase::LevelTransition => {
                self.transition_timer -= dt;
                if self.transition_timer <= 0.0 {
                    match self.load_level(self.level_index + 1) {
                        Ok(loaded) => notices.push(loaded),
                        Err(e) => warn!("Level advance failed: {e}"),
                    }
                }
            }
            Phase::LifeLostPending | Phase::GameOverPending | Phase::GameComplete => {
                self.suppression_timer = (self.suppression_timer - dt).max(0.0);
                if self.suppression_timer <= 0.0
                    && signals.just_pressed(cavern_input::Signal::Acknowledge)
                {
                    self.acknowledge(&mut notices);
                }
            }
            Phase::Terminal(_) => {}
        }
        notices
    }

    /// Rebuild level `index`, keeping score and lives. Out-of-range indices
    /// leave the session untouched.
    pub fn skip_to_level(&mut self, index: usize) -> Result<SessionNotice, SessionError> {
        if index >= self.catalog.len() {
            warn!(
                "Cannot skip to level {index}, catalog has {} levels",
                self.catalog.len()
            );
            return Err(SessionError::InvalidLevelIndex {
                index,
                count: self.catalog.len(),
            });
        }
        info!("Skipping to level {index}");
        self.load_level(index)
    }

    /// Start a new play-through: score 0, full lives, first level.
    pub fn restart(&mut self) -> Result<SessionNotice, SessionError> {
        self.score = 0;
        self.lives.reset_lives();
        info!("Session restarted");
        self.load_level(self.rules.start_level)
    }

    /// Record the pending high score under `name`. Returns whether it made
    /// the table. The session then moves on to the title.
    pub fn submit_high_score(&mut self, name: &str) -> Result<bool, SessionError> {
        let Phase::Terminal(TerminalOutcome::NameEntry { score }) = self.phase else {
            return Err(SessionError::NoPendingHighScore);
        };
        let made_table = self.services.high_scores.save_score(name, score);
        self.phase = Phase::Terminal(TerminalOutcome::Title);
        Ok(made_table)
    }

    // -- Internals ----------------------------------------------------------

    fn load_level(&mut self, index: usize) -> Result<SessionNotice, SessionError> {
        let count = self.catalog.len();
        let level = self
            .catalog
            .get(index)
            .ok_or(SessionError::InvalidLevelIndex { index, count })?;

        let biome_id = level.biome.clone().unwrap_or(BiomeId::Cavern);
        let biome = self
            .services
            .stage
            .activate(&biome_id, &mut self.services.audio);

        self.generation += 1;
        self.entities = LevelEntities::spawn(
            self.generation,
            level,
            self.services.stage.registry(),
            self.brick_span,
        );
        self.level_index = index;
        self.air.reset(self.rules.starting_air);
        self.phase = Phase::Playing;
        self.transition_timer = 0.0;
        self.suppression_timer = 0.0;

        let track = biome.audio.music_track.as_deref().unwrap_or(cues::LEVEL_MUSIC);
        self.services.audio.start_music(track);

        info!(
            "Loaded level {} '{}' ({} biome)",
            index, level.name, biome.id
        );
        let notice = SessionNotice::LevelLoaded {
            index,
            name: level.name.clone(),
            biome: biome.id.clone(),
        };
        self.biome = biome;
        Ok(notice)
    }

    fn tick_playing(
        &mut self,
        dt: f32,
        input: &TickInput,
        signals: &SignalState,
        notices: &mut Vec<SessionNotice>,
    ) {
        let player = &mut self.entities.player;
        if let Some(position) = input.player_position {
            player.position = position;
        }
        player.grounded = input.grounded;
        movement_step(
            player,
            &self.resolver,
            signals,
            input.surface,
            &self.biome.physics,
        );

        for event in &input.events {
            if self.phase != Phase::Playing {
                return;
            }
            match *event {
                GameplayEvent::CollectiblePicked(index) => {
                    if self.entities.collect(index) {
                        self.score = self.score.saturating_add(self.rules.collectible_score);
                        self.services.audio.play_effect(cues::DING, 1.0);
                        notices.push(SessionNotice::ItemCollected {
                            score: self.score,
                            remaining: self.entities.remaining_collectibles(),
                        });
                    }
                }
                GameplayEvent::CapsulePicked(index) => {
                    if self.entities.collect_capsule(index) {
                        self.air.add_air(self.rules.capsule_air);
                        self.services.audio.play_effect(cues::DING, 0.8);
                        notices.push(SessionNotice::AirRestored {
                            air: self.air.air(),
                        });
                    }
                }
                GameplayEvent::EnemyContact => self.lose_life(LossReason::Enemy, notices),
                GameplayEvent::HazardContact => self.lose_life(LossReason::Hazard, notices),
            }
        }
        if self.phase != Phase::Playing {
            return;
        }

        if self.entities.are_all_collected() && self.entities.reveal_exit() {
            debug!("All collectibles taken, exit revealed");
            notices.push(SessionNotice::ExitRevealed);
        }
        if self
            .entities
            .exit_reached(self.entities.player.position, self.rules.exit_radius)
        {
            self.complete_level(notices);
            return;
        }

        let per_step = self
            .biome
            .physics
            .scaled_air_drain(self.rules.air_drain_per_second * DRAIN_INTERVAL_SECS);
        self.air.tick(dt, per_step);
        if self.air.is_empty() {
            self.lose_life(LossReason::OutOfAir, notices);
        }
    }

    fn lose_life(&mut self, reason: LossReason, notices: &mut Vec<SessionNotice>) {
        if !self.overrides.collision_enabled {
            return;
        }
        if !self.overrides.unlimited_lives {
            self.lives.lose_life();
        }
        self.services.audio.play_effect(cues::DIE, 1.0);
        self.services.audio.stop_music();
        self.suppression_timer = self.rules.input_suppression_secs;

        if self.lives.has_lives_remaining() {
            info!(
                "Life lost ({reason:?}), {} remaining",
                self.lives.current()
            );
            self.phase = Phase::LifeLostPending;
            notices.push(SessionNotice::LifeLost {
                lives: self.lives.current(),
                reason,
            });
        } else {
            info!("Game over ({reason:?}) with score {}", self.score);
            self.phase = Phase::GameOverPending;
            notices.push(SessionNotice::GameOver {
                reason,
                score: self.score,
            });
        }
    }

    fn complete_level(&mut self, notices: &mut Vec<SessionNotice>) {
        self.services.audio.stop_music();
        if self.catalog.is_last(self.level_index) {
            info!("Final level complete with score {}", self.score);
            self.phase = Phase::GameComplete;
            self.suppression_timer = self.rules.input_suppression_secs;
            notices.push(SessionNotice::GameComplete { score: self.score });
        } else {
            info!("Level {} complete", self.level_index);
            self.phase = Phase::LevelTransition;
            self.transition_timer = self.rules.level_transition_secs;
            notices.push(SessionNotice::LevelComplete {
                index: self.level_index,
            });
        }
    }

    fn acknowledge(&mut self, notices: &mut Vec<SessionNotice>) {
        match self.phase {
            Phase::LifeLostPending => match self.load_level(self.level_index) {
                Ok(loaded) => notices.push(loaded),
                Err(e) => warn!("Level reload failed: {e}"),
            },
            Phase::GameOverPending | Phase::GameComplete => {
                let outcome = if self.services.high_scores.is_high_score(self.score) {
                    TerminalOutcome::NameEntry { score: self.score }
                } else {
                    TerminalOutcome::Title
                };
                self.services.stage.deactivate(&mut self.services.audio);
                self.services.audio.stop_music();
                info!("Session ended: {outcome:?}");
                self.phase = Phase::Terminal(outcome);
                notices.push(SessionNotice::Terminal(outcome));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
