//! Frame-coherent signal state tracker.
//!
//! [`SignalState`] accumulates press/release events during a tick and answers
//! three questions for any [`Signal`]: is it held, was it just pressed this
//! tick, and was it just released this tick. Movement reads held state;
//! acknowledgement and menu input read edges.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::PhysicalKey;

use crate::bindings::Bindings;

/// Discrete input signals polled once per tick.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Jump.
    Jump,
    /// Restart / continue / confirm.
    Acknowledge,
    /// Open or close the debug menu.
    MenuToggle,
    /// Number key 1-9, used by the debug menu for level selection.
    Digit(u8),
}

impl Signal {
    /// Parses a signal name as written in config overrides (`"Jump"`, `"Digit3"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Left" => Self::Left,
            "Right" => Self::Right,
            "Jump" => Self::Jump,
            "Acknowledge" => Self::Acknowledge,
            "MenuToggle" => Self::MenuToggle,
            other => {
                let digit: u8 = other.strip_prefix("Digit")?.parse().ok()?;
                if !(1..=9).contains(&digit) {
                    return None;
                }
                Self::Digit(digit)
            }
        })
    }
}

/// Resolved horizontal intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    /// Push left.
    Left,
    /// Push right.
    Right,
    /// No horizontal input.
    #[default]
    Idle,
}

impl Horizontal {
    /// -1.0, 1.0 or 0.0.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
            Self::Idle => 0.0,
        }
    }
}

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an OS auto-repeat event.
    pub repeat: bool,
}

/// Per-tick signal state.
///
/// 1. Feed key events through [`process_key`](Self::process_key) or drive
///    signals directly with [`press`](Self::press) / [`release`](Self::release).
/// 2. Query with [`is_held`](Self::is_held) and [`just_pressed`](Self::just_pressed).
/// 3. Call [`clear_transients`](Self::clear_transients) after the tick.
#[derive(Debug, Clone, Default)]
pub struct SignalState {
    held: HashSet<Signal>,
    just_pressed: HashSet<Signal>,
    just_released: HashSet<Signal>,
}

impl SignalState {
    /// No signals held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a key event through `bindings`. Unbound keys and repeats are ignored.
    pub fn process_key(&mut self, bindings: &Bindings, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.key else {
            return;
        };
        let Some(signal) = bindings.signal_for(code) else {
            return;
        };
        match event.state {
            ElementState::Pressed => self.press(signal),
            ElementState::Released => self.release(signal),
        }
    }

    /// Marks `signal` held. Only the first press registers an edge.
    pub fn press(&mut self, signal: Signal) {
        if self.held.insert(signal) {
            self.just_pressed.insert(signal);
        }
    }

    /// Releases `signal`.
    pub fn release(&mut self, signal: Signal) {
        if self.held.remove(&signal) {
            self.just_released.insert(signal);
        }
    }

    /// `true` while the signal is held.
    #[must_use]
    pub fn is_held(&self, signal: Signal) -> bool {
        self.held.contains(&signal)
    }

    /// `true` only during the tick the signal went down.
    #[must_use]
    pub fn just_pressed(&self, signal: Signal) -> bool {
        self.just_pressed.contains(&signal)
    }

    /// `true` only during the tick the signal went up.
    #[must_use]
    pub fn just_released(&self, signal: Signal) -> bool {
        self.just_released.contains(&signal)
    }

    /// Horizontal intent. Left wins when both directions are held.
    #[must_use]
    pub fn horizontal(&self) -> Horizontal {
        if self.is_held(Signal::Left) {
            Horizontal::Left
        } else if self.is_held(Signal::Right) {
            Horizontal::Right
        } else {
            Horizontal::Idle
        }
    }

    /// The lowest digit pressed this tick.
    #[must_use]
    pub fn just_pressed_digit(&self) -> Option<u8> {
        self.just_pressed
            .iter()
            .filter_map(|s| match s {
                Signal::Digit(d) => Some(*d),
                _ => None,
            })
            .min()
    }

    /// Clears edge sets. Call at the end of every tick.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
