//! Button-to-action translation table.
//!
//! The table is fixed for the lifetime of the process.  Buttons not listed
//! here resolve to `None` and are ignored by the controller.

pub mod button;

pub use button::{ButtonCode, RemoteButton};

use crate::domain::action::{Action, Direction, Key, ScrollDirection, ShortcutSlot};

/// Unified lookup from button codes to actions.
pub struct KeyMapper;

impl KeyMapper {
    /// Resolves a raw code straight to its action.
    ///
    /// Returns `None` for unknown codes and for known buttons without a binding.
    pub fn resolve(code: ButtonCode) -> Option<Action> {
        RemoteButton::from_code(code).and_then(Self::action_for)
    }

    /// The action bound to `button`, if any.
    pub fn action_for(button: RemoteButton) -> Option<Action> {
        use RemoteButton as B;
        Some(match button {
            B::Select => Action::Click,
            B::Up => Action::Move(Direction::Up),
            B::Down => Action::Move(Direction::Down),
            B::Left => Action::Move(Direction::Left),
            B::Right => Action::Move(Direction::Right),
            B::Forward => Action::IncreaseSensitivity,
            B::Backward => Action::DecreaseSensitivity,
            B::Exit => Action::Press(Key::Escape),
            B::Rewind => Action::Scroll(ScrollDirection::Down),
            B::FastForward => Action::Scroll(ScrollDirection::Up),
            B::F2Red => Action::LaunchShortcut(ShortcutSlot::Red),
            B::F3Green => Action::LaunchShortcut(ShortcutSlot::Green),
            B::F4Yellow => Action::LaunchShortcut(ShortcutSlot::Yellow),
            B::F1Blue => Action::LaunchShortcut(ShortcutSlot::Blue),
            B::Number2 => Action::Press(Key::ArrowUp),
            B::Number4 => Action::Press(Key::ArrowLeft),
            B::Number5 => Action::Press(Key::Enter),
            B::Number6 => Action::Press(Key::ArrowRight),
            B::Number8 => Action::Press(Key::ArrowDown),
            _ => return None,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
