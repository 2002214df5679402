//! The desktop actions a remote button can trigger.

use serde::{Deserialize, Serialize};

/// One of the four relative pointer directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Pointer displacement for a step of `magnitude` units.
    ///
    /// Screen coordinates grow rightward and downward, so `Up` is negative y.
    pub fn delta(self, magnitude: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -magnitude),
            Direction::Down => (0, magnitude),
            Direction::Left => (-magnitude, 0),
            Direction::Right => (magnitude, 0),
        }
    }
}

/// Wheel direction. Positive wheel values scroll up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn delta(self, amount: i32) -> i32 {
        match self {
            ScrollDirection::Up => amount,
            ScrollDirection::Down => -amount,
        }
    }
}

/// Keyboard keys the remote can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// The four coloured function keys, each bound to one desktop shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutSlot {
    Red,
    Green,
    Yellow,
    Blue,
}

impl ShortcutSlot {
    /// File name of the shortcut inside the shortcut directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ShortcutSlot::Red => "red.desktop",
            ShortcutSlot::Green => "green.desktop",
            ShortcutSlot::Yellow => "yellow.desktop",
            ShortcutSlot::Blue => "blue.desktop",
        }
    }
}

/// What the controller does for a resolved button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Left mouse click at the current pointer position.
    Click,
    /// Relative pointer move by the current sensitivity.
    Move(Direction),
    /// Step the sensitivity one preset up.
    IncreaseSensitivity,
    /// Step the sensitivity one preset down.
    DecreaseSensitivity,
    /// Wheel scroll by the configured amount.
    Scroll(ScrollDirection),
    /// Press and release a single key.
    Press(Key),
    /// Launch the command named by a desktop shortcut file.
    LaunchShortcut(ShortcutSlot),
}

// ── Tests ─────────────────────────────────────────────────────────────────────
