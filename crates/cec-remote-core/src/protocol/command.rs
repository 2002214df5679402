//! Command-string wire form.
//!
//! The adapter reports every CEC frame it receives as text:
//!
//! ```text
//! >> 03:44:01
//! ^^ ^^ ^^ ^^
//! |  |  |  └─ operand: user-control code (Up)
//! |  |  └──── opcode 0x44: <User Control Pressed>
//! |  └─────── header: initiator 0 (TV) → destination 3 (tuner 1, us)
//! └────────── direction marker: received frame
//! ```
//!
//! Only frames whose first two fields are exactly `03` and `44` are button
//! presses addressed to this device.  Everything else on the bus (polls,
//! power status, vendor commands, frames for other devices) is rejected
//! before the operand is even looked at.

use thiserror::Error;

use crate::keymap::button::ButtonCode;

/// Marker the adapter puts in front of received frames.
pub const RECEIVED_PREFIX: &str = ">> ";
/// Field separator inside a frame.
pub const FIELD_DELIMITER: char = ':';
/// Header byte for frames from the TV (0) to tuner 1 (3).
pub const USER_CONTROL_SOURCE: &str = "03";
/// Opcode of `<User Control Pressed>`.
pub const USER_CONTROL_PRESSED: &str = "44";

/// Why a command string is not a button press for us.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command does not start with \">> \"")]
    MissingPrefix,
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("not a user-control press for this device: {source_field}:{opcode}")]
    NotUserControl { source_field: String, opcode: String },
    #[error("invalid user-control operand {0:?}")]
    InvalidOperand(String),
}

/// Extracts the button code from a received command string.
///
/// # Errors
///
/// Returns [`CommandError`] for anything that is not exactly
/// `>> 03:44:<hex byte>`.
pub fn parse_command(command: &str) -> Result<ButtonCode, CommandError> {
    let body = command
        .trim_end()
        .strip_prefix(RECEIVED_PREFIX)
        .ok_or(CommandError::MissingPrefix)?;

    let fields: Vec<&str> = body.split(FIELD_DELIMITER).collect();
    let [source_field, opcode, operand] = fields.as_slice() else {
        return Err(CommandError::FieldCount(fields.len()));
    };

    if *source_field != USER_CONTROL_SOURCE || *opcode != USER_CONTROL_PRESSED {
        return Err(CommandError::NotUserControl {
            source_field: source_field.to_string(),
            opcode: opcode.to_string(),
        });
    }

    if operand.len() != 2 || !operand.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CommandError::InvalidOperand(operand.to_string()));
    }
    u8::from_str_radix(operand, 16)
        .map(ButtonCode)
        .map_err(|_| CommandError::InvalidOperand(operand.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
