//! CEC adapter backend built on libCEC's `cec-client` tool.
//!
//! # How does it work? (for beginners)
//!
//! `cec-client` ships with libCEC.  Started with a port, it opens the
//! adapter, registers a logical device on the bus, and then prints every
//! libCEC log message to stdout while reading commands from stdin.  With the
//! right log mask the stdout stream contains everything the controller
//! needs:
//!
//! - `TRAFFIC` lines carry every frame received from the bus, including the
//!   `<User Control Pressed>` frames sent by the TV (`>> 03:44:01`).
//! - `DEBUG` lines carry libCEC's decoded key reports.
//!
//! [`CecClientBus`] runs the tool as a child process, waits until it reports
//! `waiting for input`, and then turns each stdout line into
//! [`BusEvent`](crate::application::bus_event::BusEvent)s
//! on an `mpsc` channel.
//!
//! # Sub-modules
//!
//! - **`cec_client`** – Child process management: detection, open, scan,
//!   graceful quit.
//! - **`parse`** – Line parsers for the tool's output.

pub mod cec_client;
pub mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cec_client::{connect, detect_adapters, log_mask, scan_bus, CecClientBus};

/// Error type for adapter backend operations.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("failed to start {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("adapter I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    OpenFailed(String),

    #[error("adapter did not open within {0} s")]
    Timeout(u64),

    #[error("adapter client exited unexpectedly")]
    Exited,
}

/// One adapter found by detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    /// Port name to open, e.g. `RPI` or `/dev/ttyACM0`.
    pub port: String,
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
}

impl fmt::Display for AdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port {}", self.port)?;
        if let Some(vendor) = self.vendor_id {
            write!(f, ", vendor {vendor:#06x}")?;
        }
        if let Some(product) = self.product_id {
            write!(f, ", product {product:#06x}")?;
        }
        Ok(())
    }
}

/// Logical device type registered on the bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Tuner,
    Playback,
    Recording,
    Audio,
}

impl DeviceType {
    /// The `-t` flag value understood by `cec-client`.
    pub fn flag(self) -> &'static str {
        match self {
            DeviceType::Tuner => "t",
            DeviceType::Playback => "p",
            DeviceType::Recording => "r",
            DeviceType::Audio => "a",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_info_display() {
        let info = AdapterInfo {
            port: "RPI".into(),
            vendor_id: Some(0x2708),
            product_id: Some(0x1001),
        };
        assert_eq!(info.to_string(), "port RPI, vendor 0x2708, product 0x1001");
    }

    #[test]
    fn test_device_type_flags() {
        assert_eq!(DeviceType::Tuner.flag(), "t");
        assert_eq!(DeviceType::Audio.flag(), "a");
    }
}
