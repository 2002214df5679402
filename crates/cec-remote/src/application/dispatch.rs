//! Controller: turns remote button presses into desktop actions.
//!
//! Both wire forms arrive here.  Each has exactly one translation step into a
//! [`ButtonCode`], after which a single dispatch path resolves the action and
//! executes it.  Presses that do not resolve are ignored without a trace.
//!
//! Input injection is fire-and-forget: a failed injection is logged at debug
//! level and otherwise treated like a success.

use std::path::PathBuf;
use std::sync::Arc;

use cec_remote_core::{
    parse_command, Action, ButtonCode, KeyMapper, KeyPress, Sensitivity,
};
use tracing::debug;

use crate::application::emulate_input::{EmulationError, PlatformInputEmulator};
use crate::application::launch_shortcut::{Notifier, ProcessLauncher, ShortcutLauncher};

/// Wheel notches per scroll action when nothing else is configured.
pub const DEFAULT_SCROLL_AMOUNT: i32 = 200;

/// Tunables of the controller, filled from the config file.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Directory holding `red.desktop`, `green.desktop`, ...
    pub shortcut_dir: PathBuf,
    /// Wheel notches per Rewind / FastForward press.
    pub scroll_amount: i32,
    /// Show a notification naming each launched command.
    pub notify_on_launch: bool,
}

/// The controller use case.
///
/// Owns the only mutable state of the application, the pointer
/// [`Sensitivity`].  It is driven from one task, one event at a time.
pub struct Controller {
    emulator: Arc<dyn PlatformInputEmulator>,
    shortcuts: ShortcutLauncher,
    sensitivity: Sensitivity,
    scroll_amount: i32,
}

impl Controller {
    pub fn new(
        emulator: Arc<dyn PlatformInputEmulator>,
        launcher: Arc<dyn ProcessLauncher>,
        notifier: Arc<dyn Notifier>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            emulator,
            shortcuts: ShortcutLauncher::new(
                settings.shortcut_dir,
                launcher,
                notifier,
                settings.notify_on_launch,
            ),
            sensitivity: Sensitivity::new(),
            scroll_amount: settings.scroll_amount,
        }
    }

    /// Handles a command string such as `">> 03:44:01"`.
    ///
    /// Anything that is not a user-control press for this device is ignored.
    pub fn handle_command(&mut self, command: &str) -> Option<Action> {
        let code = parse_command(command).ok()?;
        self.handle_button(code)
    }

    /// Handles a raw key report. Release reports are ignored.
    pub fn handle_key_press(&mut self, press: KeyPress) -> Option<Action> {
        if !press.is_initial_press() {
            return None;
        }
        self.handle_button(press.code)
    }

    /// Resolves `code` and executes its action.
    ///
    /// Returns the executed action, or `None` for unmapped codes.
    pub fn handle_button(&mut self, code: ButtonCode) -> Option<Action> {
        let action = KeyMapper::resolve(code)?;
        debug!(%code, ?action, "button pressed");
        if let Err(e) = self.execute(action) {
            debug!(?action, "input emulation failed: {e}");
        }
        Some(action)
    }

    /// Current pointer step in pointer units.
    pub fn sensitivity(&self) -> u32 {
        self.sensitivity.value()
    }

    /// Position of the current step in the preset list, 0 being the slowest.
    pub fn sensitivity_step(&self) -> usize {
        self.sensitivity.index()
    }

    fn log_sensitivity(&self) {
        debug!(
            sensitivity = self.sensitivity.value(),
            step = self.sensitivity_step(),
            "sensitivity changed"
        );
    }

    fn execute(&mut self, action: Action) -> Result<(), EmulationError> {
        match action {
            Action::Click => self.emulator.emit_click(),
            Action::Move(direction) => {
                let (dx, dy) = direction.delta(self.sensitivity.value() as i32);
                self.emulator.emit_relative_move(dx, dy)
            }
            Action::IncreaseSensitivity => {
                self.sensitivity.increase();
                self.log_sensitivity();
                Ok(())
            }
            Action::DecreaseSensitivity => {
                self.sensitivity.decrease();
                self.log_sensitivity();
                Ok(())
            }
            Action::Scroll(direction) => self
                .emulator
                .emit_scroll(direction.delta(self.scroll_amount)),
            Action::Press(key) => self.emulator.emit_key_press(key),
            Action::LaunchShortcut(slot) => {
                self.shortcuts.launch(slot);
                Ok(())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::launch_shortcut::{MockNotifier, MockProcessLauncher};
    use crate::infrastructure::input_emulation::mock::MockInputEmulator;
    use cec_remote_core::Key;

    fn make_controller() -> (Controller, Arc<MockInputEmulator>) {
        make_controller_with(MockInputEmulator::new())
    }

    fn make_controller_with(emulator: MockInputEmulator) -> (Controller, Arc<MockInputEmulator>) {
        let emulator = Arc::new(emulator);
        let mut launcher = MockProcessLauncher::new();
        launcher.expect_launch().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_show().never();
        let controller = Controller::new(
            Arc::clone(&emulator) as Arc<dyn PlatformInputEmulator>,
            Arc::new(launcher),
            Arc::new(notifier),
            ControllerSettings {
                shortcut_dir: PathBuf::from("/nonexistent/cec-remote-test"),
                scroll_amount: DEFAULT_SCROLL_AMOUNT,
                notify_on_launch: true,
            },
        );
        (controller, emulator)
    }

    // ── Unmapped codes ────────────────────────────────────────────────────────

    #[test]
    fn test_unmapped_codes_produce_no_input() {
        // Arrange
        let (mut controller, em) = make_controller();

        // Act
        for raw in 0..=u8::MAX {
            let code = ButtonCode(raw);
            if KeyMapper::resolve(code).is_none() {
                assert_eq!(controller.handle_button(code), None);
            }
        }

        // Assert
        assert!(em.is_idle());
        assert_eq!(controller.sensitivity(), 10);
    }

    // ── Pointer movement ──────────────────────────────────────────────────────

    #[test]
    fn test_move_uses_current_sensitivity() {
        // Arrange
        let (mut controller, em) = make_controller();

        // Act
        controller.handle_button(ButtonCode(0x04)); // right at 10
        controller.handle_button(ButtonCode(0x4b)); // -> 40
        controller.handle_button(ButtonCode(0x01)); // up at 40

        // Assert
        assert_eq!(*em.moves.lock().unwrap(), vec![(10, 0), (0, -40)]);
    }

    #[test]
    fn test_opposite_buttons_negate_the_same_magnitude() {
        let (mut controller, em) = make_controller();
        controller.handle_button(ButtonCode(0x4b));
        controller.handle_button(ButtonCode(0x4b));

        controller.handle_button(ButtonCode(0x03)); // left
        controller.handle_button(ButtonCode(0x04)); // right
        controller.handle_button(ButtonCode(0x01)); // up
        controller.handle_button(ButtonCode(0x02)); // down

        assert_eq!(
            *em.moves.lock().unwrap(),
            vec![(-100, 0), (100, 0), (0, -100), (0, 100)]
        );
    }

    // ── Sensitivity ───────────────────────────────────────────────────────────

    #[test]
    fn test_sensitivity_saturates_at_both_ends() {
        let (mut controller, em) = make_controller();

        for _ in 0..5 {
            controller.handle_button(ButtonCode(0x4b));
        }
        assert_eq!(controller.sensitivity(), 200);

        for _ in 0..10 {
            controller.handle_button(ButtonCode(0x4c));
        }
        assert_eq!(controller.sensitivity(), 10);
        assert!(em.is_idle(), "stepping sensitivity injects no input");
    }

    #[test]
    fn test_sensitivity_step_follows_presses() {
        let (mut controller, _em) = make_controller();
        assert_eq!(controller.sensitivity_step(), 0);

        controller.handle_command(">> 03:44:4b");
        controller.handle_command(">> 03:44:4b");
        assert_eq!(controller.sensitivity_step(), 2);
        assert_eq!(controller.sensitivity(), 100);

        controller.handle_command(">> 03:44:4c");
        assert_eq!(controller.sensitivity_step(), 1);
    }

    // ── Click, scroll, keys ───────────────────────────────────────────────────

    #[test]
    fn test_select_clicks_once() {
        let (mut controller, em) = make_controller();
        assert_eq!(controller.handle_button(ButtonCode(0x00)), Some(Action::Click));
        assert_eq!(*em.clicks.lock().unwrap(), 1);
    }

    #[test]
    fn test_rewind_and_fast_forward_scroll_in_opposite_directions() {
        let (mut controller, em) = make_controller();
        controller.handle_button(ButtonCode(0x48));
        controller.handle_button(ButtonCode(0x49));
        assert_eq!(*em.scrolls.lock().unwrap(), vec![-200, 200]);
    }

    #[test]
    fn test_exit_and_number_pad_press_keys() {
        let (mut controller, em) = make_controller();
        for raw in [0x0d, 0x22, 0x24, 0x25, 0x26, 0x28] {
            controller.handle_button(ButtonCode(raw));
        }
        assert_eq!(
            *em.keys.lock().unwrap(),
            vec![
                Key::Escape,
                Key::ArrowUp,
                Key::ArrowLeft,
                Key::Enter,
                Key::ArrowRight,
                Key::ArrowDown
            ]
        );
    }

    #[test]
    fn test_shortcut_in_missing_directory_is_a_no_op() {
        let (mut controller, em) = make_controller();
        let action = controller.handle_button(ButtonCode(0x72));
        assert!(matches!(action, Some(Action::LaunchShortcut(_))));
        assert!(em.is_idle());
    }

    // ── Wire forms ────────────────────────────────────────────────────────────

    #[test]
    fn test_command_string_dispatches() {
        let (mut controller, em) = make_controller();
        controller.handle_command(">> 03:44:00");
        assert_eq!(*em.clicks.lock().unwrap(), 1);
    }

    #[test]
    fn test_foreign_command_is_ignored() {
        let (mut controller, em) = make_controller();
        assert_eq!(controller.handle_command(">> 0f:44:00"), None);
        assert_eq!(controller.handle_command(">> 03:8f"), None);
        assert!(em.is_idle());
    }

    #[test]
    fn test_key_release_report_is_ignored() {
        let (mut controller, em) = make_controller();
        assert_eq!(controller.handle_key_press(KeyPress::new(0x00, 120)), None);
        assert!(em.is_idle());

        assert_eq!(controller.handle_key_press(KeyPress::new(0x00, 0)), Some(Action::Click));
        assert_eq!(*em.clicks.lock().unwrap(), 1);
    }

    // ── Fire-and-forget ───────────────────────────────────────────────────────

    #[test]
    fn test_emulation_failure_is_not_distinguished_from_success() {
        let failing = MockInputEmulator {
            should_fail: true,
            ..Default::default()
        };
        let (mut controller, _em) = make_controller_with(failing);

        assert_eq!(controller.handle_button(ButtonCode(0x00)), Some(Action::Click));
        assert_eq!(controller.handle_button(ButtonCode(0x4b)), Some(Action::IncreaseSensitivity));
        assert_eq!(controller.sensitivity(), 40);
    }
}
