//! # cec-remote-core
//!
//! Shared library for cec-remote containing the remote button codes, the
//! fixed button-to-action table, the adjustable pointer sensitivity, and the
//! parsers for the two wire forms in which button presses arrive from the
//! CEC adapter.
//!
//! It has zero dependencies on OS APIs, input devices, or child processes.
//!
//! # Architecture overview (for beginners)
//!
//! A TV remote talks to the TV over infrared; the TV forwards button presses
//! to the active HDMI device over **CEC** (Consumer Electronics Control), a
//! slow one-wire bus that is part of HDMI.  A single-board computer plugged
//! into the TV sees those presses through a CEC adapter and turns them into
//! mouse and keyboard input, so the remote can drive a desktop.
//!
//! This crate is the pure part of that translation:
//!
//! - **`keymap`** – The CEC "user control" codes ([`ButtonCode`],
//!   [`RemoteButton`]) and the table that maps each known button to an
//!   [`Action`].
//!
//! - **`domain`** – The actions themselves, the bounded [`Sensitivity`]
//!   counter, and the parser for desktop shortcut files.
//!
//! - **`protocol`** – How presses arrive: the `">> 03:44:01"` command string,
//!   the raw key-press report, and adapter log severities.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::action::{Action, Direction, Key, ScrollDirection, ShortcutSlot};
pub use domain::sensitivity::Sensitivity;
pub use domain::shortcut::LaunchCommand;
pub use keymap::button::{ButtonCode, RemoteButton};
pub use keymap::KeyMapper;
pub use protocol::command::{parse_command, CommandError};
pub use protocol::keypress::KeyPress;
pub use protocol::log::CecLogLevel;
