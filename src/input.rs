//! Input event types for the embedding shell.
//!
//! The core never talks to a windowing library. The embedder reduces its
//! native events to these types and feeds them to
//! [`Editor`](crate::editor::Editor).

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS: the shortcut modifier.
    pub fn command_or_ctrl(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling, already reduced to
/// canvas coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Keyboard event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_or_ctrl() {
        assert!(!Modifiers::default().command_or_ctrl());
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(ctrl.command_or_ctrl());
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(meta.command_or_ctrl());
    }
}
