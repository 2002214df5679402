//! `cec-client` child process management.

use std::process::Stdio;
use std::time::Duration;

use cec_remote_core::CecLogLevel;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::parse::{
    parse_adapter_list, parse_log_line, parse_output_line, parse_scan_report, parse_version_banner,
};
use super::{AdapterInfo, BusError};
use crate::application::bus_event::{BusEvent, InputSource};
use crate::application::startup::StartupError;
use crate::infrastructure::storage::config::AdapterConfig;

/// Capacity of the bus event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Printed by `cec-client` once the adapter is open.
const READY_MARKER: &str = "waiting for input";

/// Status lines `cec-client` prints when it gives up opening the adapter.
const OPEN_FAILURE_MARKERS: [&str; 3] = ["unable to open", "could not open", "autodetect FAILED"];

/// How long `q` may take before the client is killed.
const QUIT_GRACE: Duration = Duration::from_secs(2);

const SCAN_TIMEOUT: Duration = Duration::from_secs(60);

/// The `-d` log mask passed to `cec-client`.
///
/// Button presses only show up in the log, so the mask always includes the
/// level that carries the selected wire form: `TRAFFIC` for command strings,
/// `DEBUG` for key reports.  Everything beyond the configured level is
/// filtered again before it is logged.
pub fn log_mask(log_level: CecLogLevel, source: InputSource) -> u8 {
    let required = match source {
        InputSource::Command => CecLogLevel::Traffic,
        InputSource::KeyPress => CecLogLevel::Debug,
    };
    log_level.max(required).mask_up_to()
}

/// A running, opened `cec-client`.
pub struct CecClientBus {
    child: Child,
    stdin: ChildStdin,
    reader: JoinHandle<()>,
}

impl CecClientBus {
    /// Starts `cec-client` on `port` and waits until the adapter is open.
    ///
    /// Events seen while opening are forwarded with `try_send` and dropped
    /// once the channel is full, since nothing consumes them before the loop
    /// starts.  Afterwards a reader task forwards every event and finally
    /// [`BusEvent::Closed`].
    pub async fn open(
        config: &AdapterConfig,
        port: &str,
        mask: u8,
        events: mpsc::Sender<BusEvent>,
    ) -> Result<Self, BusError> {
        let mut command = Command::new(&config.client_binary);
        command.args([
            "-t",
            config.device_type.flag(),
            "-o",
            config.device_name.as_str(),
            "-d",
            mask.to_string().as_str(),
            port,
        ]);
        debug!(binary = %config.client_binary, port, mask, "starting adapter client");
        Self::open_with(
            command,
            &config.client_binary,
            Duration::from_secs(config.open_timeout_secs),
            events,
        )
        .await
    }

    async fn open_with(
        mut command: Command,
        binary: &str,
        timeout: Duration,
        events: mpsc::Sender<BusEvent>,
    ) -> Result<Self, BusError> {
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        let mut child = command.spawn().map_err(|source| BusError::Spawn {
            binary: binary.to_owned(),
            source,
        })?;
        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(BusError::Exited);
        };
        let mut lines = OutputLines::new(BufReader::new(stdout));

        let opened = match tokio::time::timeout(timeout, wait_until_open(&mut lines, &events)).await {
            Ok(result) => result,
            Err(_) => Err(BusError::Timeout(timeout.as_secs())),
        };
        if let Err(e) = opened {
            let _ = child.kill().await;
            return Err(e);
        }

        let reader = tokio::spawn(forward_lines(lines, events));
        Ok(Self {
            child,
            stdin,
            reader,
        })
    }

    /// Asks the TV to switch to our input.
    pub async fn activate_source(&mut self) -> Result<(), BusError> {
        self.send_command("as").await
    }

    async fn send_command(&mut self, command: &str) -> Result<(), BusError> {
        self.stdin.write_all(format!("{command}\n").as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Quits the client, killing it if it does not exit in time.
    pub async fn close(mut self) {
        if let Err(e) = self.send_command("q").await {
            debug!("could not send quit to adapter client: {e}");
        }
        match tokio::time::timeout(QUIT_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => debug!(%status, "adapter client exited"),
            Ok(Err(e)) => warn!("waiting for adapter client failed: {e}"),
            Err(_) => {
                warn!("adapter client did not quit, killing it");
                let _ = self.child.kill().await;
            }
        }
        self.reader.abort();
    }
}

/// Line reader over the client's stdout.
///
/// Device names on the bus are not guaranteed to be UTF-8, so invalid bytes
/// are replaced instead of ending the stream.
struct OutputLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R> OutputLines<R>
where
    R: AsyncBufRead + Unpin,
{
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, or `None` at EOF.
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }
}

/// Consumes output until the ready marker, an open failure, or EOF.
async fn wait_until_open<R>(
    lines: &mut OutputLines<R>,
    events: &mpsc::Sender<BusEvent>,
) -> Result<(), BusError>
where
    R: AsyncBufRead + Unpin,
{
    while let Some(line) = lines.next_line().await? {
        if parse_log_line(&line).is_none() {
            if line.contains(READY_MARKER) {
                return Ok(());
            }
            if OPEN_FAILURE_MARKERS.iter().any(|m| line.contains(m)) {
                return Err(BusError::OpenFailed(line.trim().to_owned()));
            }
            continue;
        }
        for event in parse_output_line(&line) {
            if let BusEvent::Log(log) = &event {
                if let Some(version) = parse_version_banner(&log.message) {
                    info!("libCEC version {version} loaded");
                }
            }
            if let Err(e) = events.try_send(event) {
                debug!("adapter event dropped while opening: {e}");
            }
        }
    }
    Err(BusError::Exited)
}

/// Forwards events until EOF, then reports [`BusEvent::Closed`].
async fn forward_lines<R>(mut lines: OutputLines<R>, events: mpsc::Sender<BusEvent>)
where
    R: AsyncBufRead + Unpin,
{
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                for event in parse_output_line(&line) {
                    if events.send(event).await.is_err() {
                        return;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("reading adapter output failed: {e}");
                break;
            }
        }
    }
    let _ = events.send(BusEvent::Closed).await;
}

/// Lists the adapters `cec-client -l` can see.
pub async fn detect_adapters(binary: &str) -> Result<Vec<AdapterInfo>, BusError> {
    let output = Command::new(binary)
        .arg("-l")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|source| BusError::Spawn {
            binary: binary.to_owned(),
            source,
        })?;
    Ok(parse_adapter_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Runs a single `scan` command and returns the bus report.
pub async fn scan_bus(config: &AdapterConfig, port: Option<&str>) -> Result<String, BusError> {
    let mut command = Command::new(&config.client_binary);
    command
        .args(["-s", "-d", "1", "-t", config.device_type.flag()])
        .args(["-o", config.device_name.as_str()])
        .args(port)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    let mut child = command.spawn().map_err(|source| BusError::Spawn {
        binary: config.client_binary.clone(),
        source,
    })?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(b"scan\n").await?;
    }
    let output = tokio::time::timeout(SCAN_TIMEOUT, child.wait_with_output())
        .await
        .map_err(|_| BusError::Timeout(SCAN_TIMEOUT.as_secs()))??;
    Ok(parse_scan_report(&String::from_utf8_lossy(&output.stdout)))
}

/// Finds an adapter (unless one is configured) and opens it.
///
/// # Errors
///
/// [`StartupError::NoAdapter`] if detection finds nothing and
/// [`StartupError::OpenFailed`] if the adapter does not open.
pub async fn connect(
    config: &AdapterConfig,
    source: InputSource,
    events: mpsc::Sender<BusEvent>,
) -> Result<(CecClientBus, AdapterInfo), StartupError> {
    let adapter = match &config.port {
        Some(port) => AdapterInfo {
            port: port.clone(),
            vendor_id: None,
            product_id: None,
        },
        None => detect_adapters(&config.client_binary)
            .await
            .map_err(|e| {
                warn!("adapter detection failed: {e}");
                StartupError::NoAdapter
            })?
            .into_iter()
            .next()
            .ok_or(StartupError::NoAdapter)?,
    };
    info!("CEC adapter: {adapter}");

    let mask = log_mask(config.log_level, source);
    let mut bus = CecClientBus::open(config, &adapter.port, mask, events)
        .await
        .map_err(|e| StartupError::OpenFailed {
            port: adapter.port.clone(),
            reason: e.to_string(),
        })?;

    if config.activate_source {
        match bus.activate_source().await {
            Ok(()) => info!("requested active source"),
            Err(e) => warn!("could not request active source: {e}"),
        }
    }
    Ok((bus, adapter))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
