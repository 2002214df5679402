//! CEC "User Control" codes (CEC 1.4, table 27: UI Command Codes).
//!
//! When a button on the TV remote is pressed, the TV sends a
//! `<User Control Pressed>` message (opcode 0x44) to the active device.  Its
//! single operand is one of the codes below.  This is the canonical button
//! identifier inside cec-remote: both wire forms (the command string and the
//! raw key-press report) are translated to a [`ButtonCode`] first.
//!
//! | Button         | Code |
//! |----------------|------|
//! | Select / OK    | 0x00 |
//! | Up             | 0x01 |
//! | Exit           | 0x0D |
//! | Number 5       | 0x25 |
//! | Rewind         | 0x48 |
//! | F2 (red)       | 0x72 |
//!
//! Not every TV forwards every button.  Codes that have no [`RemoteButton`]
//! variant are still valid [`ButtonCode`]s; they just never map to an action.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw CEC user-control code as received from the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ButtonCode(pub u8);

impl fmt::Display for ButtonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

impl From<u8> for ButtonCode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Known CEC remote buttons.
///
/// The numeric value of each variant is its user-control code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RemoteButton {
    // Navigation (0x00–0x0D)
    Select = 0x00,
    Up = 0x01,
    Down = 0x02,
    Left = 0x03,
    Right = 0x04,
    RightUp = 0x05,
    RightDown = 0x06,
    LeftUp = 0x07,
    LeftDown = 0x08,
    RootMenu = 0x09,
    SetupMenu = 0x0A,
    ContentsMenu = 0x0B,
    FavoriteMenu = 0x0C,
    Exit = 0x0D,

    // Number pad (0x20–0x2C)
    Number0 = 0x20,
    Number1 = 0x21,
    Number2 = 0x22,
    Number3 = 0x23,
    Number4 = 0x24,
    Number5 = 0x25,
    Number6 = 0x26,
    Number7 = 0x27,
    Number8 = 0x28,
    Number9 = 0x29,
    Dot = 0x2A,
    Enter = 0x2B,
    Clear = 0x2C,

    // Channel / input (0x30–0x35)
    ChannelUp = 0x30,
    ChannelDown = 0x31,
    PreviousChannel = 0x32,
    SoundSelect = 0x33,
    InputSelect = 0x34,
    DisplayInformation = 0x35,
    Help = 0x36,
    PageUp = 0x37,
    PageDown = 0x38,

    // Power / volume (0x40–0x43)
    Power = 0x40,
    VolumeUp = 0x41,
    VolumeDown = 0x42,
    Mute = 0x43,

    // Transport (0x44–0x4C)
    Play = 0x44,
    Stop = 0x45,
    Pause = 0x46,
    Record = 0x47,
    Rewind = 0x48,
    FastForward = 0x49,
    Eject = 0x4A,
    Forward = 0x4B,
    Backward = 0x4C,

    // Coloured function keys (0x71–0x75)
    F1Blue = 0x71,
    F2Red = 0x72,
    F3Green = 0x73,
    F4Yellow = 0x74,
    F5 = 0x75,
}

impl RemoteButton {
    /// Resolves a raw code to a known button.
    ///
    /// Returns `None` for codes that are reserved or vendor-specific.
    pub fn from_code(code: ButtonCode) -> Option<Self> {
        use RemoteButton::*;
        Some(match code.0 {
            0x00 => Select,
            0x01 => Up,
            0x02 => Down,
            0x03 => Left,
            0x04 => Right,
            0x05 => RightUp,
            0x06 => RightDown,
            0x07 => LeftUp,
            0x08 => LeftDown,
            0x09 => RootMenu,
            0x0A => SetupMenu,
            0x0B => ContentsMenu,
            0x0C => FavoriteMenu,
            0x0D => Exit,
            0x20 => Number0,
            0x21 => Number1,
            0x22 => Number2,
            0x23 => Number3,
            0x24 => Number4,
            0x25 => Number5,
            0x26 => Number6,
            0x27 => Number7,
            0x28 => Number8,
            0x29 => Number9,
            0x2A => Dot,
            0x2B => Enter,
            0x2C => Clear,
            0x30 => ChannelUp,
            0x31 => ChannelDown,
            0x32 => PreviousChannel,
            0x33 => SoundSelect,
            0x34 => InputSelect,
            0x35 => DisplayInformation,
            0x36 => Help,
            0x37 => PageUp,
            0x38 => PageDown,
            0x40 => Power,
            0x41 => VolumeUp,
            0x42 => VolumeDown,
            0x43 => Mute,
            0x44 => Play,
            0x45 => Stop,
            0x46 => Pause,
            0x47 => Record,
            0x48 => Rewind,
            0x49 => FastForward,
            0x4A => Eject,
            0x4B => Forward,
            0x4C => Backward,
            0x71 => F1Blue,
            0x72 => F2Red,
            0x73 => F3Green,
            0x74 => F4Yellow,
            0x75 => F5,
            _ => return None,
        })
    }

    /// The user-control code of this button.
    pub fn code(self) -> ButtonCode {
        ButtonCode(self as u8)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_resolves_navigation_buttons() {
        assert_eq!(RemoteButton::from_code(ButtonCode(0x00)), Some(RemoteButton::Select));
        assert_eq!(RemoteButton::from_code(ButtonCode(0x04)), Some(RemoteButton::Right));
        assert_eq!(RemoteButton::from_code(ButtonCode(0x0D)), Some(RemoteButton::Exit));
    }

    #[test]
    fn test_from_code_resolves_colour_keys() {
        assert_eq!(RemoteButton::from_code(ButtonCode(0x71)), Some(RemoteButton::F1Blue));
        assert_eq!(RemoteButton::from_code(ButtonCode(0x74)), Some(RemoteButton::F4Yellow));
    }

    #[test]
    fn test_from_code_returns_none_for_reserved_codes() {
        for raw in [0x0E, 0x1F, 0x3F, 0x70, 0xFF] {
            assert_eq!(RemoteButton::from_code(ButtonCode(raw)), None, "code {raw:#04x}");
        }
    }

    #[test]
    fn test_code_is_inverse_of_from_code() {
        for raw in 0..=u8::MAX {
            if let Some(button) = RemoteButton::from_code(ButtonCode(raw)) {
                assert_eq!(button.code(), ButtonCode(raw));
            }
        }
    }

    #[test]
    fn test_button_code_displays_as_two_lowercase_hex_digits() {
        assert_eq!(ButtonCode(0x4b).to_string(), "4b");
        assert_eq!(ButtonCode(0x01).to_string(), "01");
    }
}
