//! Game session orchestration: the level lifecycle state machine and the
//! rules it owns (lives, air, score, movement, high scores).
//!
//! [`SessionStateMachine::tick`] is the single entry point per frame. It takes
//! the physics collaborator's [`TickInput`] and the input collaborator's
//! [`SignalState`](cavern_input::SignalState) and returns the
//! [`SessionNotice`]s the presentation layer should react to.

mod air;
mod debug_menu;
mod entities;
mod error;
mod high_scores;
mod lives;
mod machine;
pub mod movement;

pub use air::{Air, DRAIN_INTERVAL_SECS, MAX_AIR};
pub use debug_menu::{DebugMenu, MenuAction};
pub use entities::{AirCapsule, Animation, Collectible, Enemy, Exit, Facing, LevelEntities, Player};
pub use error::SessionError;
pub use high_scores::{HIGH_SCORES_KEY, HighScoreEntry, HighScoreTable, MAX_HIGH_SCORES};
pub use lives::Lives;
pub use machine::{
    DebugOverrides, GameplayEvent, LossReason, Phase, SessionNotice, SessionServices,
    SessionStateMachine, TerminalOutcome, TickInput,
};
pub use movement::SurfaceFrictionResolver;
