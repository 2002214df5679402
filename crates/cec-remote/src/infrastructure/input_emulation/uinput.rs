//! Linux input emulation through a `uinput` virtual device.
//!
//! # What is uinput? (for beginners)
//!
//! `uinput` is a kernel module that lets a user-space process create a
//! virtual input device.  Whatever the process writes to it is delivered to
//! the rest of the system exactly like events from a real mouse or keyboard,
//! so it works under X11, Wayland and on the bare console alike.
//!
//! The device is declared once with the capabilities it will ever use: the
//! left mouse button, six keys, and three relative axes (X, Y and the
//! vertical wheel).  Every `emit` call is followed by a `SYN_REPORT`, which
//! tells consumers that a complete input frame has arrived.
//!
//! # Permissions
//!
//! Creating the device needs write access to `/dev/uinput`.  Typically the
//! user is put into the `input` group, or a udev rule grants access.  When it
//! is missing, [`UinputEmulator::new`] fails with `DeviceUnavailable`.

use std::sync::Mutex;

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AttributeSet, EventType, InputEvent, Key as EvKey, RelativeAxisType,
};

use cec_remote_core::Key;

use crate::application::emulate_input::{EmulationError, PlatformInputEmulator};

const PRESSED: i32 = 1;
const RELEASED: i32 = 0;

/// Maps a desktop key to its Linux input key code.
fn linux_key(key: Key) -> EvKey {
    match key {
        Key::Escape => EvKey::KEY_ESC,
        Key::Enter => EvKey::KEY_ENTER,
        Key::ArrowUp => EvKey::KEY_UP,
        Key::ArrowDown => EvKey::KEY_DOWN,
        Key::ArrowLeft => EvKey::KEY_LEFT,
        Key::ArrowRight => EvKey::KEY_RIGHT,
    }
}

/// Input emulator backed by a `uinput` virtual mouse-and-keyboard.
pub struct UinputEmulator {
    device: Mutex<VirtualDevice>,
}

impl UinputEmulator {
    /// Creates the virtual device, announced to the system as `name`.
    pub fn new(name: &str) -> Result<Self, EmulationError> {
        let mut keys = AttributeSet::<EvKey>::new();
        keys.insert(EvKey::BTN_LEFT);
        for key in [
            Key::Escape,
            Key::Enter,
            Key::ArrowUp,
            Key::ArrowDown,
            Key::ArrowLeft,
            Key::ArrowRight,
        ] {
            keys.insert(linux_key(key));
        }

        let mut axes = AttributeSet::<RelativeAxisType>::new();
        axes.insert(RelativeAxisType::REL_X);
        axes.insert(RelativeAxisType::REL_Y);
        axes.insert(RelativeAxisType::REL_WHEEL);

        let device = VirtualDeviceBuilder::new()
            .and_then(|builder| builder.name(name).with_keys(&keys))
            .and_then(|builder| builder.with_relative_axes(&axes))
            .and_then(|builder| builder.build())
            .map_err(|e| EmulationError::DeviceUnavailable(format!("/dev/uinput: {e}")))?;

        Ok(Self {
            device: Mutex::new(device),
        })
    }

    fn emit(&self, events: &[InputEvent]) -> Result<(), EmulationError> {
        let mut device = self
            .device
            .lock()
            .map_err(|_| EmulationError::Platform("uinput device lock poisoned".into()))?;
        device
            .emit(events)
            .map_err(|e| EmulationError::Platform(e.to_string()))
    }

    /// Sends a press frame and then a release frame for `code`.
    fn tap(&self, code: u16) -> Result<(), EmulationError> {
        self.emit(&[InputEvent::new(EventType::KEY, code, PRESSED)])?;
        self.emit(&[InputEvent::new(EventType::KEY, code, RELEASED)])
    }
}

impl PlatformInputEmulator for UinputEmulator {
    fn emit_click(&self) -> Result<(), EmulationError> {
        self.tap(EvKey::BTN_LEFT.code())
    }

    fn emit_relative_move(&self, dx: i32, dy: i32) -> Result<(), EmulationError> {
        self.emit(&[
            InputEvent::new(EventType::RELATIVE, RelativeAxisType::REL_X.0, dx),
            InputEvent::new(EventType::RELATIVE, RelativeAxisType::REL_Y.0, dy),
        ])
    }

    fn emit_scroll(&self, delta: i32) -> Result<(), EmulationError> {
        self.emit(&[InputEvent::new(
            EventType::RELATIVE,
            RelativeAxisType::REL_WHEEL.0,
            delta,
        )])
    }

    fn emit_key_press(&self, key: Key) -> Result<(), EmulationError> {
        self.tap(linux_key(key).code())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
