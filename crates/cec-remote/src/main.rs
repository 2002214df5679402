//! cec-remote entry point.
//!
//! Wires together the input emulator, the shortcut launcher, the notifier
//! and the CEC adapter backend, then runs the event dispatch loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- TOML file or defaults
//!  └─ UinputEmulator::new()      -- virtual mouse + keyboard
//!  └─ Controller::new()          -- button -> action dispatch
//!  └─ cec_bus::connect()         -- detect + open adapter
//!  └─ run_event_loop()           -- until Ctrl-C or adapter exit
//!  └─ CecClientBus::close()      -- send "q", then kill
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning                               |
//! |------|---------------------------------------|
//! | 0    | Stopped by Ctrl-C                     |
//! | 1    | No CEC adapter found                  |
//! | 2    | The adapter could not be opened       |
//! | 3    | The virtual input device is missing   |
//!
//! Any other error, including the adapter going away while running, exits
//! with the generic failure status.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cec_remote::application::bus_event::{run_event_loop, LoopExit};
use cec_remote::application::dispatch::{Controller, ControllerSettings};
use cec_remote::application::emulate_input::PlatformInputEmulator;
use cec_remote::application::launch_shortcut::Notifier;
use cec_remote::application::startup::StartupError;
use cec_remote::infrastructure::cec_bus::{
    self, cec_client::EVENT_CHANNEL_CAPACITY, detect_adapters, scan_bus,
};
use cec_remote::infrastructure::launcher::TokioProcessLauncher;
use cec_remote::infrastructure::notify::{DesktopNotifier, LogNotifier};
use cec_remote::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig,
};
use cec_remote_core::CecLogLevel;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Drive a media-center desktop with the TV remote over HDMI-CEC.
#[derive(Debug, Parser)]
#[command(name = "cec-remote", version)]
struct Cli {
    /// Path of the config file.
    ///
    /// Defaults to `$XDG_CONFIG_HOME/cec-remote/config.toml`.  A missing file
    /// means "all defaults".
    #[arg(long, short, env = "CEC_REMOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short)]
    verbose: bool,

    /// Least severe adapter message to log: error, warning, notice, traffic
    /// or debug.  Overrides `adapter.log_level` from the config file.
    #[arg(long, env = "CEC_REMOTE_ADAPTER_LOG")]
    adapter_log_level: Option<CecLogLevel>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the adapter and map remote buttons to input (default).
    Run,
    /// List the CEC adapters that can be found.
    Adapters,
    /// Print the devices present on the CEC bus.
    Scan,
    /// Print the effective configuration as TOML.
    Config {
        /// Also write it to the config file path.
        #[arg(long)]
        write: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => config_file_path().context("locating config file")?,
    };
    let config = load_config_from(&config_path);

    // RUST_LOG wins, then --verbose, then the config file.
    let default_filter = match (&config, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(cfg), false) => cfg.logging.level.clone(),
        (Err(_), false) => "info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config =
        config.with_context(|| format!("loading config from {}", config_path.display()))?;
    apply_overrides(&cli, &mut config);

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(config).await,
        Command::Adapters => list_adapters(&config).await,
        Command::Scan => scan(&config).await,
        Command::Config { write } => print_config(&config, write.then_some(&config_path)),
    };

    if let Err(e) = &result {
        if let Some(startup) = e.downcast_ref::<StartupError>() {
            error!("{startup}");
            std::process::exit(startup.code());
        }
    }
    result
}

/// Command-line settings that take precedence over the config file.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(level) = cli.adapter_log_level {
        config.adapter.log_level = level;
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("cec-remote {} starting", env!("CARGO_PKG_VERSION"));

    let emulator = create_emulator(&config)?;
    let notifier = create_notifier(&config).await;
    let mut controller = Controller::new(
        emulator,
        Arc::new(TokioProcessLauncher),
        notifier,
        ControllerSettings {
            shortcut_dir: config.shortcuts.resolved_directory(),
            scroll_amount: config.input.scroll_amount,
            notify_on_launch: config.shortcuts.notify,
        },
    );

    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (bus, adapter) = cec_bus::connect(&config.adapter, config.input.source, tx).await?;
    info!(port = %adapter.port, "ready, listening for remote buttons");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };
    let exit = run_event_loop(
        &mut controller,
        &mut rx,
        config.input.source,
        config.adapter.log_level,
        shutdown,
    )
    .await;

    bus.close().await;
    match exit {
        LoopExit::Shutdown => {
            info!("cec-remote stopped");
            Ok(())
        }
        LoopExit::AdapterClosed | LoopExit::ChannelClosed => {
            error!("CEC adapter closed unexpectedly");
            anyhow::bail!("CEC adapter on {} closed", adapter.port)
        }
    }
}

async fn list_adapters(config: &AppConfig) -> anyhow::Result<()> {
    let adapters = detect_adapters(&config.adapter.client_binary)
        .await
        .context("detecting CEC adapters")?;
    if adapters.is_empty() {
        return Err(StartupError::NoAdapter.into());
    }
    for adapter in adapters {
        println!("{adapter}");
    }
    Ok(())
}

async fn scan(config: &AppConfig) -> anyhow::Result<()> {
    info!("scanning CEC bus");
    let report = scan_bus(&config.adapter, config.adapter.port.as_deref())
        .await
        .context("scanning CEC bus")?;
    println!("{report}");
    Ok(())
}

fn print_config(config: &AppConfig, write_to: Option<&PathBuf>) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    if let Some(path) = write_to {
        save_config_to(config, path)?;
        info!("config written to {}", path.display());
    }
    Ok(())
}

// ── Wiring ────────────────────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
fn create_emulator(config: &AppConfig) -> Result<Arc<dyn PlatformInputEmulator>, StartupError> {
    use cec_remote::infrastructure::input_emulation::uinput::UinputEmulator;

    let emulator = UinputEmulator::new(&config.input.device_name)
        .map_err(|e| StartupError::InputDevice(e.to_string()))?;
    debug!(name = %config.input.device_name, "virtual input device created");
    Ok(Arc::new(emulator))
}

#[cfg(not(target_os = "linux"))]
fn create_emulator(_config: &AppConfig) -> Result<Arc<dyn PlatformInputEmulator>, StartupError> {
    Err(StartupError::InputDevice(
        "input injection is only supported on Linux".into(),
    ))
}

async fn create_notifier(config: &AppConfig) -> Arc<dyn Notifier> {
    if !config.shortcuts.notify {
        return Arc::new(LogNotifier);
    }
    let timeout = Duration::from_millis(config.shortcuts.notification_timeout_ms);
    match DesktopNotifier::connect(timeout).await {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            debug!("no desktop notifications, logging instead: {e}");
            Arc::new(LogNotifier)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_log_level_flag_overrides_config() {
        // Arrange
        let cli = Cli::try_parse_from(["cec-remote", "--adapter-log-level", "Traffic", "scan"])
            .unwrap();
        let mut config = AppConfig::default();

        // Act
        apply_overrides(&cli, &mut config);

        // Assert
        assert_eq!(config.adapter.log_level, CecLogLevel::Traffic);
        assert!(matches!(cli.command, Some(Command::Scan)));
    }

    #[test]
    fn test_config_log_level_kept_without_flag() {
        let cli = Cli::try_parse_from(["cec-remote"]).unwrap();
        let mut config = AppConfig::default();
        config.adapter.log_level = CecLogLevel::Notice;

        apply_overrides(&cli, &mut config);

        assert_eq!(config.adapter.log_level, CecLogLevel::Notice);
    }

    #[test]
    fn test_unknown_adapter_log_level_is_rejected() {
        let err = Cli::try_parse_from(["cec-remote", "--adapter-log-level", "verbose"])
            .unwrap_err();
        assert!(err.to_string().contains("unknown adapter log level: verbose"));
    }
}
