//! Adapter log severities.
//!
//! libCEC tags each log message with one of five levels.  They are bit flags
//! so that a client can subscribe to any combination; cec-remote treats them
//! as an ordered scale and logs everything up to a configured minimum
//! severity.
//!
//! | Level   | Bit  | Line prefix |
//! |---------|------|-------------|
//! | Error   | 0x01 | `ERROR:`    |
//! | Warning | 0x02 | `WARNING:`  |
//! | Notice  | 0x04 | `NOTICE:`   |
//! | Traffic | 0x08 | `TRAFFIC:`  |
//! | Debug   | 0x10 | `DEBUG:`    |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of one adapter log message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CecLogLevel {
    Error = 0x01,
    Warning = 0x02,
    Notice = 0x04,
    Traffic = 0x08,
    Debug = 0x10,
}

impl CecLogLevel {
    pub const ALL: [CecLogLevel; 5] = [
        CecLogLevel::Error,
        CecLogLevel::Warning,
        CecLogLevel::Notice,
        CecLogLevel::Traffic,
        CecLogLevel::Debug,
    ];

    /// `true` if a message at this level passes a `minimum` severity filter.
    ///
    /// `Error` always passes; `Debug` passes only when the filter is `Debug`.
    pub fn passes(self, minimum: CecLogLevel) -> bool {
        self <= minimum
    }

    /// Bit mask selecting this level and every more severe one.
    pub fn mask_up_to(self) -> u8 {
        Self::ALL
            .iter()
            .filter(|level| level.passes(self))
            .fold(0, |mask, level| mask | *level as u8)
    }

    /// Parses the prefix libCEC writes in front of a log line (`"TRAFFIC"`).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "ERROR" => Some(CecLogLevel::Error),
            "WARNING" => Some(CecLogLevel::Warning),
            "NOTICE" => Some(CecLogLevel::Notice),
            "TRAFFIC" => Some(CecLogLevel::Traffic),
            "DEBUG" => Some(CecLogLevel::Debug),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CecLogLevel::Error => "error",
            CecLogLevel::Warning => "warning",
            CecLogLevel::Notice => "notice",
            CecLogLevel::Traffic => "traffic",
            CecLogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for CecLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CecLogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown adapter log level: {s}"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
