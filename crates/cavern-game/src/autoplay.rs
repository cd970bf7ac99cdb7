//! Scripted player for headless runs.
//!
//! Stands in for both the physics and the keyboard collaborators: each frame
//! it teleports the player onto the next pickup (or the exit once the level is
//! cleared), reports the overlap, and presses the arrow keys and Enter through
//! the key bindings.

use cavern_input::{Bindings, RawKeyEvent, SignalState};
use cavern_session::{
    GameplayEvent, Phase, SessionError, SessionNotice, SessionStateMachine, TerminalOutcome,
    TickInput,
};
use glam::Vec2;
use tracing::{debug, info, warn};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Simulated frame length.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Air level below which the pilot detours for a capsule.
const CAPSULE_AIR: f32 = 50.0;

/// Keyboard-and-physics stand-in driving a session.
pub struct Autopilot {
    bindings: Bindings,
    signals: SignalState,
    hazard_level: Option<usize>,
    hazard_done: bool,
}

impl Autopilot {
    /// Pilot pressing keys through `bindings`.
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            signals: SignalState::new(),
            hazard_level: None,
            hazard_done: false,
        }
    }

    /// Walk into a hazard once on the first visit to level `index`.
    pub fn with_hazard_on(mut self, index: usize) -> Self {
        self.hazard_level = Some(index);
        self
    }

    /// Signals for the frame being planned.
    pub fn signals(&self) -> &SignalState {
        &self.signals
    }

    /// Decide this frame's keys and physics report.
    pub fn plan(&mut self, session: &SessionStateMachine) -> TickInput {
        match session.phase() {
            Phase::Playing => {
                self.key(KeyCode::Enter, false);
                self.plan_playing(session)
            }
            Phase::LifeLostPending | Phase::GameOverPending | Phase::GameComplete => {
                // alternate so every other frame carries a fresh press
                let down = !self.signals.is_held(cavern_input::Signal::Acknowledge);
                self.key(KeyCode::Enter, down);
                self.release_walk();
                TickInput::idle(FRAME_DT)
            }
            Phase::LevelTransition | Phase::Terminal(_) => {
                self.key(KeyCode::Enter, false);
                self.release_walk();
                TickInput::idle(FRAME_DT)
            }
        }
    }

    /// Clear press edges after the session consumed them.
    pub fn end_frame(&mut self) {
        self.signals.clear_transients();
    }

    fn plan_playing(&mut self, session: &SessionStateMachine) -> TickInput {
        let entities = session.entities();
        let surface = entities.bricks.first().map(|b| b.surface);
        let mut input = TickInput {
            dt: FRAME_DT,
            grounded: true,
            surface,
            ..Default::default()
        };

        if !self.hazard_done && self.hazard_level == Some(session.level_index()) {
            self.hazard_done = true;
            debug!("Autopilot stumbles into a hazard");
            input.events.push(GameplayEvent::HazardContact);
            return input;
        }

        let capsule = entities
            .capsules
            .iter()
            .position(|c| !c.collected)
            .filter(|_| session.air() < CAPSULE_AIR);
        let target = if let Some(index) = capsule {
            input.events.push(GameplayEvent::CapsulePicked(index));
            entities.capsules[index].position
        } else if let Some(index) = entities.collectibles.iter().position(|c| !c.collected) {
            input.events.push(GameplayEvent::CollectiblePicked(index));
            entities.collectibles[index].position
        } else {
            entities.exit.position
        };

        self.walk_toward(session.player().position, target);
        input.player_position = Some(target);
        input
    }

    fn walk_toward(&mut self, from: Vec2, to: Vec2) {
        let right = to.x > from.x;
        let left = to.x < from.x;
        self.key(KeyCode::ArrowRight, right);
        self.key(KeyCode::ArrowLeft, left);
    }

    fn release_walk(&mut self) {
        self.key(KeyCode::ArrowRight, false);
        self.key(KeyCode::ArrowLeft, false);
    }

    fn key(&mut self, code: KeyCode, down: bool) {
        let event = RawKeyEvent {
            key: PhysicalKey::Code(code),
            state: if down {
                ElementState::Pressed
            } else {
                ElementState::Released
            },
            repeat: false,
        };
        self.signals.process_key(&self.bindings, event);
    }
}

/// How a scripted run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames simulated.
    pub frames: u64,
    /// Levels won.
    pub levels_completed: usize,
    /// Lives lost along the way.
    pub lives_lost: usize,
    /// Score at the end.
    pub score: u32,
    /// Terminal outcome, if the session got that far.
    pub outcome: Option<TerminalOutcome>,
    /// Whether the submitted name made the high score table.
    pub made_table: Option<bool>,
}

/// Drive `session` until it reaches the title or `max_frames` elapse. A
/// qualifying score is entered under `name`.
pub fn run_autoplay(
    session: &mut SessionStateMachine,
    pilot: &mut Autopilot,
    name: &str,
    max_frames: u64,
) -> Result<RunSummary, SessionError> {
    let mut summary = RunSummary {
        frames: 0,
        levels_completed: 0,
        lives_lost: 0,
        score: 0,
        outcome: None,
        made_table: None,
    };

    while summary.frames < max_frames {
        match session.phase() {
            Phase::Terminal(TerminalOutcome::NameEntry { score }) => {
                summary.outcome = Some(TerminalOutcome::NameEntry { score });
                let made = session.submit_high_score(name)?;
                info!("Entered '{name}' with {score} points (made table: {made})");
                summary.made_table = Some(made);
                continue;
            }
            Phase::Terminal(TerminalOutcome::Title) => {
                if summary.outcome.is_none() {
                    summary.outcome = Some(TerminalOutcome::Title);
                }
                break;
            }
            _ => {}
        }

        let input = pilot.plan(session);
        for notice in session.tick(&input, pilot.signals()) {
            match &notice {
                SessionNotice::LevelComplete { .. } | SessionNotice::GameComplete { .. } => {
                    summary.levels_completed += 1;
                }
                SessionNotice::LifeLost { .. } | SessionNotice::GameOver { .. } => {
                    summary.lives_lost += 1;
                }
                _ => {}
            }
            log_notice(&notice);
        }
        pilot.end_frame();
        summary.frames += 1;
    }

    if summary.outcome.is_none() {
        warn!("Autoplay stopped after {} frames", summary.frames);
    }
    summary.score = session.score();
    Ok(summary)
}

fn log_notice(notice: &SessionNotice) {
    match notice {
        SessionNotice::LevelLoaded { index, name, biome } => {
            info!("Level {} '{name}' [{biome}]", index + 1)
        }
        SessionNotice::ItemCollected { score, remaining } => {
            debug!("Collected, score {score}, {remaining} left")
        }
        SessionNotice::LevelComplete { index } => info!("Level {} cleared", index + 1),
        SessionNotice::GameComplete { score } => info!("All levels cleared with {score} points"),
        SessionNotice::LifeLost { lives, reason } => info!("Lost a life ({reason:?}), {lives} left"),
        SessionNotice::GameOver { reason, score } => info!("Game over ({reason:?}), {score} points"),
        other => debug!("{other:?}"),
    }
}
