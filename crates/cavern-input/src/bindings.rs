//! Key-to-signal bindings with defaults, config overrides and RON persistence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;
use winit::keyboard::KeyCode;

use crate::signal::Signal;

/// Errors from reading or writing a bindings file.
#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    /// RON parse failure.
    #[error("failed to parse bindings: {0}")]
    Parse(#[source] ron::error::SpannedError),
    /// RON serialization failure.
    #[error("failed to serialize bindings: {0}")]
    Serialize(#[source] ron::Error),
    /// A key name that has no [`KeyCode`] mapping.
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// On-disk form: key names instead of [`KeyCode`]s.
#[derive(Serialize, Deserialize)]
struct BindingsFile {
    bindings: Vec<(String, Signal)>,
}

/// Maps physical keys to [`Signal`]s. Several keys may share a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    map: HashMap<KeyCode, Signal>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut map = HashMap::from([
            (KeyCode::ArrowLeft, Signal::Left),
            (KeyCode::KeyA, Signal::Left),
            (KeyCode::ArrowRight, Signal::Right),
            (KeyCode::KeyD, Signal::Right),
            (KeyCode::ArrowUp, Signal::Jump),
            (KeyCode::KeyW, Signal::Jump),
            (KeyCode::Space, Signal::Jump),
            (KeyCode::Enter, Signal::Acknowledge),
            (KeyCode::KeyR, Signal::Acknowledge),
            (KeyCode::F1, Signal::MenuToggle),
        ]);
        for (digit, code) in DIGIT_KEYS.iter().enumerate() {
            map.insert(*code, Signal::Digit(digit as u8 + 1));
        }
        Self { map }
    }
}

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

impl Bindings {
    /// Bindings with no keys mapped.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Signal bound to `code`.
    pub fn signal_for(&self, code: KeyCode) -> Option<Signal> {
        self.map.get(&code).copied()
    }

    /// Bind `code` to `signal`, replacing the key's previous binding.
    pub fn bind(&mut self, code: KeyCode, signal: Signal) {
        self.map.insert(code, signal);
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no keys are bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply `key name -> signal name` overrides from the config. Entries with
    /// an unknown key or signal are skipped with a warning.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) {
        for (key_name, signal_name) in overrides {
            let Some(code) = keycode_from_name(key_name) else {
                warn!("Ignoring binding for unknown key '{key_name}'");
                continue;
            };
            let Some(signal) = Signal::from_name(signal_name) else {
                warn!("Ignoring binding '{key_name}' to unknown signal '{signal_name}'");
                continue;
            };
            self.bind(code, signal);
        }
    }

    /// Serialize to RON.
    ///
    /// # Errors
    /// Returns [`BindingsError::Serialize`] if RON serialization fails.
    pub fn to_ron(&self) -> Result<String, BindingsError> {
        let mut bindings: Vec<(String, Signal)> = self
            .map
            .iter()
            .map(|(code, signal)| (format!("{code:?}"), *signal))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        ron::ser::to_string_pretty(&BindingsFile { bindings }, ron::ser::PrettyConfig::new())
            .map_err(BindingsError::Serialize)
    }

    /// Parse from RON produced by [`to_ron`](Self::to_ron).
    ///
    /// # Errors
    /// Returns [`BindingsError`] on malformed RON or unknown key names.
    pub fn from_ron(s: &str) -> Result<Self, BindingsError> {
        let file: BindingsFile = ron::from_str(s).map_err(BindingsError::Parse)?;
        let mut map = HashMap::with_capacity(file.bindings.len());
        for (name, signal) in file.bindings {
            let code = keycode_from_name(&name).ok_or(BindingsError::UnknownKey(name))?;
            map.insert(code, signal);
        }
        Ok(Self { map })
    }
}

/// Resolve a [`KeyCode`] from its debug name (`"KeyW"`, `"ArrowLeft"`).
pub fn keycode_from_name(name: &str) -> Option<KeyCode> {
    if let Some(digit) = name.strip_prefix("Digit") {
        let index: usize = digit.parse().ok()?;
        return match index {
            0 => Some(KeyCode::Digit0),
            1..=9 => Some(DIGIT_KEYS[index - 1]),
            _ => None,
        };
    }
    Some(match name {
        "KeyA" => KeyCode::KeyA,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyZ" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}
