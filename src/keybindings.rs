//! Customizable keybindings.
//!
//! Three bindings drive the keyboard side of the state machine: the mode
//! toggle (page focus only), commit (popup input only) and cancel.

use agentation_ui::{Key, Modifiers};
use serde::{Deserialize, Serialize};

/// Which action a binding triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMode,
    Commit,
    Cancel,
}

/// Keybinding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Toggles annotation mode; character keys match case-insensitively
    pub toggle: Key,
    /// Commits the popup text (without Shift, so Shift+Enter inserts a newline)
    pub commit: Key,
    /// Closes the popup, or leaves annotation mode when no popup is open
    pub cancel: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: Key::Char('a'),
            commit: Key::Enter,
            cancel: Key::Escape,
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle key pressed without Ctrl/Alt/Meta.
    pub fn is_toggle(&self, key: Key, modifiers: Modifiers) -> bool {
        key.matches_ignore_case(&self.toggle)
            && !modifiers.ctrl
            && !modifiers.alt
            && !modifiers.meta
    }

    pub fn is_commit(&self, key: Key, modifiers: Modifiers) -> bool {
        key == self.commit && !modifiers.shift
    }

    pub fn is_cancel(&self, key: Key) -> bool {
        key == self.cancel
    }

    /// The key currently bound to `action`.
    pub fn key_for(&self, action: KeyAction) -> Key {
        match action {
            KeyAction::ToggleMode => self.toggle,
            KeyAction::Commit => self.commit,
            KeyAction::Cancel => self.cancel,
        }
    }

    pub fn set_key(&mut self, action: KeyAction, key: Key) {
        match action {
            KeyAction::ToggleMode => self.toggle = key,
            KeyAction::Commit => self.commit = key,
            KeyAction::Cancel => self.cancel = key,
        }
    }

    /// Check if `key` is already used by a binding other than `exclude`.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key, exclude: Option<KeyAction>) -> Option<String> {
        [
            (KeyAction::ToggleMode, "Toggle annotation mode"),
            (KeyAction::Commit, "Commit annotation"),
            (KeyAction::Cancel, "Cancel"),
        ]
        .into_iter()
        .filter(|(action, _)| Some(*action) != exclude)
        .find(|(action, _)| self.key_for(*action).matches_ignore_case(&key))
        .map(|(_, name)| name.to_string())
    }
}

/// Convert a key to a display string.
pub fn key_to_string(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_uppercase().to_string(),
        Key::Enter => "Enter".to_string(),
        Key::Escape => "Esc".to_string(),
        Key::Backspace => "Backspace".to_string(),
        Key::Delete => "Delete".to_string(),
        Key::Tab => "Tab".to_string(),
        Key::Space => "Space".to_string(),
        Key::Up => "↑".to_string(),
        Key::Down => "↓".to_string(),
        Key::Left => "←".to_string(),
        Key::Right => "→".to_string(),
    }
}
