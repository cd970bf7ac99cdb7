//! In-game level skip menu.

use cavern_input::{Signal, SignalState};
use tracing::debug;

/// What the menu asked the session to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// The menu was opened (`true`) or closed (`false`).
    Toggled(bool),
    /// Jump to the zero-based level index.
    SkipTo(usize),
}

/// Menu state. Does nothing unless enabled.
#[derive(Debug, Clone, Default)]
pub struct DebugMenu {
    enabled: bool,
    open: bool,
}

impl DebugMenu {
    /// Closed menu.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            open: false,
        }
    }

    /// Whether the menu is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the menu reacts to input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the menu. Disabling closes it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.open = false;
        }
    }

    /// Read this tick's signals. The toggle signal opens and closes the menu;
    /// digit N while open selects level N and closes it.
    pub fn update(&mut self, signals: &SignalState) -> Option<MenuAction> {
        if !self.enabled {
            return None;
        }
        if signals.just_pressed(Signal::MenuToggle) {
            self.open = !self.open;
            debug!("Debug menu {}", if self.open { "opened" } else { "closed" });
            return Some(MenuAction::Toggled(self.open));
        }
        if !self.open {
            return None;
        }
        match signals.just_pressed_digit() {
            Some(digit) if digit >= 1 => {
                self.open = false;
                Some(MenuAction::SkipTo(usize::from(digit) - 1))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(menu: &mut DebugMenu, signals: &mut SignalState, press: Signal) -> Option<MenuAction> {
        signals.press(press);
        let action = menu.update(signals);
        signals.release(press);
        signals.clear_transients();
        action
    }

    #[test]
    fn test_disabled_menu_ignores_input() {
        let mut menu = DebugMenu::new(false);
        let mut signals = SignalState::new();
        assert_eq!(tick(&mut menu, &mut signals, Signal::MenuToggle), None);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_toggle_and_skip() {
        let mut menu = DebugMenu::new(true);
        let mut signals = SignalState::new();
        assert_eq!(tick(&mut menu, &mut signals, Signal::Digit(3)), None);
        assert_eq!(
            tick(&mut menu, &mut signals, Signal::MenuToggle),
            Some(MenuAction::Toggled(true))
        );
        assert_eq!(
            tick(&mut menu, &mut signals, Signal::Digit(3)),
            Some(MenuAction::SkipTo(2))
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn test_held_toggle_fires_once() {
        let mut menu = DebugMenu::new(true);
        let mut signals = SignalState::new();
        signals.press(Signal::MenuToggle);
        assert_eq!(menu.update(&signals), Some(MenuAction::Toggled(true)));
        signals.clear_transients();
        assert_eq!(menu.update(&signals), None);
        assert!(menu.is_open());
    }

    #[test]
    fn test_disabling_closes() {
        let mut menu = DebugMenu::new(true);
        let mut signals = SignalState::new();
        tick(&mut menu, &mut signals, Signal::MenuToggle);
        menu.set_enabled(false);
        assert!(!menu.is_open());
    }
}
