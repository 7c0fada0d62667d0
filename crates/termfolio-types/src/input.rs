//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these enums. The session never
//! sees raw terminal or window-system input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Character typed.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// A named navigation or editing key pressed.
    KeyPress(Key),
    /// Ctrl-C: cancel the line (or form) being typed.
    Interrupt,
    /// The visible area changed size (columns, rows).
    Resize { width: u16, height: u16 },
    /// User requested quit (Ctrl-D, window close, etc.).
    Quit,
}

/// Named keys that map across all backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Escape,
    PageUp,
    PageDown,
}

impl InputEvent {
    /// Whether this event is the escape key, the exit signal of every
    /// full-screen overlay.
    pub fn is_escape(&self) -> bool {
        matches!(self, InputEvent::KeyPress(Key::Escape))
    }
}
