//! Parsers for the text `cec-client` writes to stdout.
//!
//! # Output format
//!
//! Every libCEC log message becomes one line: a padded level prefix, the
//! time in milliseconds since the connection was opened in brackets, a tab,
//! and the message.
//!
//! ```text
//! TRAFFIC: [             377]	>> 03:44:01
//! DEBUG:   [             378]	key pressed: up (1) current(ff) duration(0)
//! DEBUG:   [             480]	key released: up (1) D:102ms
//! ```
//!
//! A `TRAFFIC` message starting with `>> ` is a frame received from the bus;
//! it is reported both as a log message and as a command string.  Key
//! reports are only present when `DEBUG` logging is enabled.  Any other line
//! (status messages, the scan report) is not an event.

use cec_remote_core::{CecLogLevel, KeyPress};

use super::AdapterInfo;
use crate::application::bus_event::{AdapterLog, BusEvent};

const KEY_PRESSED: &str = "key pressed: ";
const KEY_RELEASED: &str = "key released: ";

/// Decodes one stdout line into zero or more events.
pub fn parse_output_line(line: &str) -> Vec<BusEvent> {
    let Some(log) = parse_log_line(line) else {
        return Vec::new();
    };

    let mut events = Vec::with_capacity(2);
    match log.level {
        CecLogLevel::Traffic if log.message.starts_with(">> ") => {
            events.push(BusEvent::Command(log.message.clone()));
        }
        CecLogLevel::Debug => {
            if let Some(press) = parse_key_report(&log.message) {
                events.push(BusEvent::KeyPress(press));
            }
        }
        _ => {}
    }
    events.insert(0, BusEvent::Log(log));
    events
}

/// Splits a `LEVEL: [time]\tmessage` line.
pub fn parse_log_line(line: &str) -> Option<AdapterLog> {
    let (prefix, rest) = line.split_once(':')?;
    let level = CecLogLevel::from_prefix(prefix)?;
    let rest = rest.trim_start().strip_prefix('[')?;
    let (time, message) = rest.split_once(']')?;
    Some(AdapterLog {
        level,
        time_ms: time.trim().parse().ok()?,
        message: message.trim().to_owned(),
    })
}

/// Decodes a `key pressed:` / `key released:` debug message.
///
/// The button name may itself contain parentheses (`F1 (blue) (71)`), so the
/// code is the last parenthesised group before the duration.
pub fn parse_key_report(message: &str) -> Option<KeyPress> {
    let (body, duration_ms) = if let Some(body) = message.strip_prefix(KEY_PRESSED) {
        let (head, tail) = body.split_once(" current(")?;
        let duration = tail.split_once("duration(")?.1.split_once(')')?.0;
        (head, duration.parse().ok()?)
    } else if let Some(body) = message.strip_prefix(KEY_RELEASED) {
        let (head, tail) = body.rsplit_once(" D:")?;
        (head, tail.trim_end_matches("ms").parse().ok()?)
    } else {
        return None;
    };

    let code = body.rsplit_once('(')?.1.strip_suffix(')')?;
    let code = u8::from_str_radix(code, 16).ok()?;
    Some(KeyPress::new(code, duration_ms))
}

/// Extracts the adapters from the output of `cec-client -l`.
///
/// ```text
/// device:              1
/// com port:            RPI
/// vendor id:           2708
/// product id:          1001
/// ```
pub fn parse_adapter_list(output: &str) -> Vec<AdapterInfo> {
    let mut adapters: Vec<AdapterInfo> = Vec::new();
    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "com port" => adapters.push(AdapterInfo {
                port: value.to_owned(),
                vendor_id: None,
                product_id: None,
            }),
            "vendor id" => {
                if let Some(adapter) = adapters.last_mut() {
                    adapter.vendor_id = u16::from_str_radix(value, 16).ok();
                }
            }
            "product id" => {
                if let Some(adapter) = adapters.last_mut() {
                    adapter.product_id = u16::from_str_radix(value, 16).ok();
                }
            }
            _ => {}
        }
    }
    adapters
}

/// Finds the libCEC version in the client registration message.
pub fn parse_version_banner(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("libCEC version = ")?;
    let version = rest.split(',').next()?.trim();
    (!version.is_empty()).then_some(version)
}

/// Keeps the human-readable part of `cec-client -s` output for a bus scan.
pub fn parse_scan_report(output: &str) -> String {
    let report: Vec<&str> = output
        .lines()
        .skip_while(|line| !line.starts_with("CEC bus information"))
        .collect();
    report.join("\n").trim_end().to_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
