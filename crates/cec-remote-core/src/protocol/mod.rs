//! Wire forms in which the adapter reports button presses and log messages.

pub mod command;
pub mod keypress;
pub mod log;

pub use command::{parse_command, CommandError};
pub use keypress::KeyPress;
pub use log::CecLogLevel;
