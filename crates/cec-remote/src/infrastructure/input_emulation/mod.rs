//! Input emulation implementations.
//!
//! The uinput emulator is only built on Linux, where the kernel's `uinput`
//! module provides the virtual device.  `MockInputEmulator` is available
//! everywhere for tests.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod uinput;
