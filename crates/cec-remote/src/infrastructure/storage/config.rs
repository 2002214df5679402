//! TOML-based configuration for cec-remote.
//!
//! The file lives at `$XDG_CONFIG_HOME/cec-remote/config.toml`, falling back
//! to `~/.config/cec-remote/config.toml`.  Every field has a default, so the
//! program runs without any file at all and an existing file only needs the
//! fields that differ:
//!
//! ```toml
//! [adapter]
//! device_name = "living-room"
//! log_level = "notice"
//!
//! [shortcuts]
//! directory = "/home/pi/Desktop"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent.  Whole sections are
//! `#[serde(default)]`, so a missing `[input]` table is the same as an empty
//! one.

use std::path::{Path, PathBuf};

use cec_remote_core::CecLogLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::bus_event::InputSource;
use crate::infrastructure::cec_bus::DeviceType;

/// Longest OSD name a CEC device may announce.
pub const MAX_DEVICE_NAME_LEN: usize = 14;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config parsed but holds a value that cannot be used.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub shortcuts: ShortcutsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the CEC adapter is opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdapterConfig {
    /// libCEC command-line client to run.
    #[serde(default = "default_client_binary")]
    pub client_binary: String,
    /// OSD name announced to the other devices on the bus.
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Logical device type to register as.
    #[serde(default)]
    pub device_type: DeviceType,
    /// Adapter port.  Detected automatically when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Seconds to wait for the adapter to open.
    #[serde(default = "default_open_timeout_secs")]
    pub open_timeout_secs: u64,
    /// Ask the TV to switch to this input after opening.
    #[serde(default)]
    pub activate_source: bool,
    /// Least severe adapter log message that is still logged.
    #[serde(default = "default_adapter_log_level")]
    pub log_level: CecLogLevel,
}

/// How button presses become input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Which wire form drives the controller.
    #[serde(default)]
    pub source: InputSource,
    /// Wheel notches per Rewind / FastForward press.
    #[serde(default = "default_scroll_amount")]
    pub scroll_amount: i32,
    /// Name of the virtual input device.
    #[serde(default = "default_input_device_name")]
    pub device_name: String,
}

/// Where the coloured-key shortcuts live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortcutsConfig {
    /// Directory holding `red.desktop` etc.  A leading `~` is the home directory.
    #[serde(default = "default_shortcut_directory")]
    pub directory: String,
    /// Show a notification naming each launched command.
    #[serde(default = "default_true")]
    pub notify: bool,
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_client_binary() -> String {
    "cec-client".to_string()
}
fn default_device_name() -> String {
    "raspi-player".to_string()
}
fn default_open_timeout_secs() -> u64 {
    10
}
fn default_adapter_log_level() -> CecLogLevel {
    CecLogLevel::Warning
}
fn default_scroll_amount() -> i32 {
    crate::application::dispatch::DEFAULT_SCROLL_AMOUNT
}
fn default_input_device_name() -> String {
    "cec-remote virtual input".to_string()
}
fn default_shortcut_directory() -> String {
    "~/Desktop".to_string()
}
fn default_true() -> bool {
    true
}
fn default_notification_timeout_ms() -> u64 {
    3000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            client_binary: default_client_binary(),
            device_name: default_device_name(),
            device_type: DeviceType::default(),
            port: None,
            open_timeout_secs: default_open_timeout_secs(),
            activate_source: false,
            log_level: default_adapter_log_level(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source: InputSource::default(),
            scroll_amount: default_scroll_amount(),
            device_name: default_input_device_name(),
        }
    }
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            directory: default_shortcut_directory(),
            notify: default_true(),
            notification_timeout_ms: default_notification_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Rejects values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.adapter.device_name;
        if name.is_empty() || name.len() > MAX_DEVICE_NAME_LEN || !name.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "adapter.device_name must be 1 to {MAX_DEVICE_NAME_LEN} ASCII characters, got {name:?}"
            )));
        }
        if self.adapter.client_binary.trim().is_empty() {
            return Err(ConfigError::Invalid("adapter.client_binary is empty".into()));
        }
        if self.adapter.open_timeout_secs == 0 {
            return Err(ConfigError::Invalid("adapter.open_timeout_secs must be positive".into()));
        }
        if self.input.scroll_amount <= 0 {
            return Err(ConfigError::Invalid("input.scroll_amount must be positive".into()));
        }
        Ok(())
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl ShortcutsConfig {
    /// The shortcut directory with a leading `~` expanded.
    pub fn resolved_directory(&self) -> PathBuf {
        expand_home(&self.directory, std::env::var_os("HOME").map(PathBuf::from))
    }
}

fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if neither `XDG_CONFIG_HOME`
/// nor `HOME` is set.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(base.join("cec-remote").join("config.toml"))
}

/// Loads the config from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value fails validation.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Writes `config` to `path`, creating the parent directory if needed.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, config.to_toml()?).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
