//! Mock platform input emulator for unit testing.
//!
//! # Why a mock emulator?
//!
//! The real emulator creates a virtual input device through `/dev/uinput`,
//! which needs write permission on that node and actually moves the pointer
//! of the machine running the tests.  The `MockInputEmulator` records every
//! request in a `Mutex<Vec<...>>` instead, so assertions can inspect exactly
//! what the controller asked for and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let emulator = Arc::new(MockInputEmulator::new());
//! let mut controller = Controller::new(Arc::clone(&emulator) as _, launcher, notifier, settings);
//!
//! controller.handle_button(ButtonCode(0x04));
//!
//! assert_eq!(*emulator.moves.lock().unwrap(), vec![(10, 0)]);
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return
//! `EmulationError::Platform`.  Nothing is recorded in that case.

use std::sync::Mutex;

use cec_remote_core::Key;

use crate::application::emulate_input::{EmulationError, PlatformInputEmulator};

/// A mock emulator that records all calls without touching the OS.
#[derive(Default)]
pub struct MockInputEmulator {
    /// Number of `emit_click` calls.
    pub clicks: Mutex<usize>,
    /// Each `(dx, dy)` passed to `emit_relative_move`.
    pub moves: Mutex<Vec<(i32, i32)>>,
    /// Each wheel delta passed to `emit_scroll`.
    pub scrolls: Mutex<Vec<i32>>,
    /// Each key passed to `emit_key_press`.
    pub keys: Mutex<Vec<Key>>,
    /// When `true`, every method returns an error and records nothing.
    pub should_fail: bool,
}

impl MockInputEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if no input of any kind has been recorded.
    pub fn is_idle(&self) -> bool {
        *self.clicks.lock().unwrap() == 0
            && self.moves.lock().unwrap().is_empty()
            && self.scrolls.lock().unwrap().is_empty()
            && self.keys.lock().unwrap().is_empty()
    }

    fn check(&self) -> Result<(), EmulationError> {
        if self.should_fail {
            return Err(EmulationError::Platform("mock failure".into()));
        }
        Ok(())
    }
}

impl PlatformInputEmulator for MockInputEmulator {
    fn emit_click(&self) -> Result<(), EmulationError> {
        self.check()?;
        *self.clicks.lock().unwrap() += 1;
        Ok(())
    }

    fn emit_relative_move(&self, dx: i32, dy: i32) -> Result<(), EmulationError> {
        self.check()?;
        self.moves.lock().unwrap().push((dx, dy));
        Ok(())
    }

    fn emit_scroll(&self, delta: i32) -> Result<(), EmulationError> {
        self.check()?;
        self.scrolls.lock().unwrap().push(delta);
        Ok(())
    }

    fn emit_key_press(&self, key: Key) -> Result<(), EmulationError> {
        self.check()?;
        self.keys.lock().unwrap().push(key);
        Ok(())
    }
}
