//! Infrastructure layer.
//!
//! Contains the OS-facing adapters: the CEC adapter backend, input
//! injection, process launching, desktop notifications and the config file.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `cec_remote_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`cec_bus`** – Runs libCEC's `cec-client`, turns its output into
//!   `BusEvent`s, detects adapters and scans the bus.
//!
//! - **`input_emulation`** – `PlatformInputEmulator` implementations: a
//!   `uinput` virtual device on Linux and a recording mock for tests.
//!
//! - **`launcher`** – Spawns shortcut commands without waiting for them.
//!
//! - **`notify`** – Desktop notifications over D-Bus, with a log fallback.
//!
//! - **`storage`** – TOML configuration file.

pub mod cec_bus;
pub mod input_emulation;
pub mod launcher;
pub mod notify;
pub mod storage;
