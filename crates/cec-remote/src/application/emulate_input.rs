//! Input emulation seam: the controller asks for pointer and key events, an
//! OS-specific implementation in the infrastructure layer injects them.

use cec_remote_core::Key;
use thiserror::Error;

/// Error type for input emulation operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("input device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Platform-agnostic input emulation trait.
///
/// Each supported OS provides an implementation in the infrastructure layer.
/// Every call is a complete gesture: a click is press plus release, a key
/// press is key-down plus key-up.
pub trait PlatformInputEmulator: Send + Sync {
    /// Clicks the left mouse button at the current pointer position.
    fn emit_click(&self) -> Result<(), EmulationError>;

    /// Moves the pointer by `(dx, dy)` pointer units. Positive y is down.
    fn emit_relative_move(&self, dx: i32, dy: i32) -> Result<(), EmulationError>;

    /// Turns the vertical wheel by `delta` notches. Positive is up.
    fn emit_scroll(&self, delta: i32) -> Result<(), EmulationError>;

    /// Presses and releases `key`.
    fn emit_key_press(&self, key: Key) -> Result<(), EmulationError>;
}
