//! Input event records handed from the presentation shell to the demos.
//! The drawing API never looks at these.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Key identity, reduced to what the demos react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Space,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
    /// Anything else, by platform key code
    Other(i32),
}

impl Key {
    /// The character for printable keys, lowercase as reported
    pub fn as_char(self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c),
            Key::Space => Some(' '),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    KeyDown {
        key: Key,
        scan_code: i32,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        scan_code: i32,
        modifiers: Modifiers,
    },
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButton,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButton,
    },
}

impl InputEvent {
    /// Key-down event with no scan code or modifiers, for scripted input
    pub fn key_down(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            scan_code: 0,
            modifiers: Modifiers::empty(),
        }
    }

    /// Pointer position carried by mouse events
    pub fn position(&self) -> Option<(i32, i32)> {
        match *self {
            InputEvent::MouseMove { x, y }
            | InputEvent::MouseDown { x, y, .. }
            | InputEvent::MouseUp { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }
}
