//! Raw key-press wire form.
//!
//! Besides the command strings, the adapter reports remote buttons as a bare
//! user-control code plus a duration.  A press is reported twice: once when
//! the button goes down (duration 0) and once when it is released (duration
//! in milliseconds).  Only the first report triggers an action.

use crate::keymap::button::ButtonCode;

/// A key report from the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: ButtonCode,
    pub duration_ms: u32,
}

impl KeyPress {
    pub fn new(code: u8, duration_ms: u32) -> Self {
        Self {
            code: ButtonCode(code),
            duration_ms,
        }
    }

    /// `true` for the button-down report, `false` for the release report.
    pub fn is_initial_press(&self) -> bool {
        self.duration_ms == 0
    }
}
