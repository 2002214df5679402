//! Events delivered by the bus adapter and the loop that dispatches them.
//!
//! # Event dispatch loop (for beginners)
//!
//! The adapter backend runs its own reader task and pushes every decoded
//! line into an `mpsc` channel as a [`BusEvent`].  [`run_event_loop`] is the
//! only consumer: it takes one event at a time and hands it to the
//! [`Controller`].  Because there is exactly one consumer, the controller's
//! state needs no locking.
//!
//! - `BusEvent::Command` – a command string seen on the bus.
//! - `BusEvent::KeyPress` – a decoded key report with its duration.
//! - `BusEvent::Log` – a log message of the adapter library, re-emitted
//!   through `tracing` if it passes the configured severity filter.
//! - `BusEvent::Closed` – the adapter went away; the loop ends.
//!
//! Only one of the two button wire forms drives the controller, selected by
//! [`InputSource`], so that a single physical press is never handled twice.

use std::future::Future;

use cec_remote_core::{CecLogLevel, KeyPress};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::dispatch::Controller;

/// One log message of the adapter library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterLog {
    pub level: CecLogLevel,
    /// Milliseconds since the adapter was opened.
    pub time_ms: u64,
    pub message: String,
}

/// Everything the adapter backend can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Command(String),
    KeyPress(KeyPress),
    Log(AdapterLog),
    Closed,
}

/// Which wire form drives the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Structured command strings (`>> 03:44:01`).
    #[default]
    Command,
    /// Raw key reports with a duration.
    KeyPress,
}

/// Why [`run_event_loop`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The shutdown future completed.
    Shutdown,
    /// The adapter reported that it has closed.
    AdapterClosed,
    /// Every sender of the event channel was dropped.
    ChannelClosed,
}

/// Re-emits an adapter log message through `tracing`.
///
/// Messages less severe than `minimum` are dropped.  Returns `true` if the
/// message was logged.
pub fn log_adapter_message(log: &AdapterLog, minimum: CecLogLevel) -> bool {
    if !log.level.passes(minimum) {
        return false;
    }
    let adapter_level = log.level.as_str();
    let adapter_time = log.time_ms;
    match log.level {
        CecLogLevel::Error => error!(adapter_level, adapter_time, "{}", log.message),
        CecLogLevel::Warning => warn!(adapter_level, adapter_time, "{}", log.message),
        CecLogLevel::Notice | CecLogLevel::Traffic | CecLogLevel::Debug => {
            info!(adapter_level, adapter_time, "{}", log.message)
        }
    }
    true
}

/// Handles a single event.  Returns `false` once the adapter has closed.
pub fn handle_bus_event(
    controller: &mut Controller,
    event: BusEvent,
    source: InputSource,
    log_level: CecLogLevel,
) -> bool {
    match event {
        BusEvent::Command(command) => {
            if source == InputSource::Command {
                controller.handle_command(&command);
            }
        }
        BusEvent::KeyPress(press) => {
            if source == InputSource::KeyPress {
                controller.handle_key_press(press);
            }
        }
        BusEvent::Log(log) => {
            log_adapter_message(&log, log_level);
        }
        BusEvent::Closed => return false,
    }
    true
}

/// Dispatches events until the adapter closes or `shutdown` completes.
pub async fn run_event_loop<F>(
    controller: &mut Controller,
    events: &mut mpsc::Receiver<BusEvent>,
    source: InputSource,
    log_level: CecLogLevel,
    shutdown: F,
) -> LoopExit
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received");
                return LoopExit::Shutdown;
            }
            event = events.recv() => match event {
                Some(event) => {
                    if !handle_bus_event(controller, event, source, log_level) {
                        return LoopExit::AdapterClosed;
                    }
                }
                None => {
                    debug!("bus event channel closed");
                    return LoopExit::ChannelClosed;
                }
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::application::dispatch::{ControllerSettings, DEFAULT_SCROLL_AMOUNT};
    use crate::application::launch_shortcut::{MockNotifier, MockProcessLauncher};
    use crate::infrastructure::input_emulation::mock::MockInputEmulator;

    fn make_controller() -> (Controller, Arc<MockInputEmulator>) {
        let emulator = Arc::new(MockInputEmulator::new());
        let controller = Controller::new(
            Arc::clone(&emulator) as _,
            Arc::new(MockProcessLauncher::new()),
            Arc::new(MockNotifier::new()),
            ControllerSettings {
                shortcut_dir: PathBuf::from("/nonexistent"),
                scroll_amount: DEFAULT_SCROLL_AMOUNT,
                notify_on_launch: false,
            },
        );
        (controller, emulator)
    }

    fn log(level: CecLogLevel) -> AdapterLog {
        AdapterLog {
            level,
            time_ms: 42,
            message: "adapter says hi".into(),
        }
    }

    #[test]
    fn test_log_filter_drops_less_severe_messages() {
        assert!(log_adapter_message(&log(CecLogLevel::Error), CecLogLevel::Warning));
        assert!(log_adapter_message(&log(CecLogLevel::Warning), CecLogLevel::Warning));
        assert!(!log_adapter_message(&log(CecLogLevel::Notice), CecLogLevel::Warning));
        assert!(!log_adapter_message(&log(CecLogLevel::Debug), CecLogLevel::Traffic));
    }

    #[test]
    fn test_command_source_ignores_key_reports() {
        // Arrange
        let (mut controller, em) = make_controller();

        // Act
        handle_bus_event(
            &mut controller,
            BusEvent::KeyPress(KeyPress::new(0x00, 0)),
            InputSource::Command,
            CecLogLevel::Warning,
        );
        handle_bus_event(
            &mut controller,
            BusEvent::Command(">> 03:44:00".into()),
            InputSource::Command,
            CecLogLevel::Warning,
        );

        // Assert
        assert_eq!(*em.clicks.lock().unwrap(), 1);
    }

    #[test]
    fn test_keypress_source_ignores_commands() {
        let (mut controller, em) = make_controller();

        handle_bus_event(
            &mut controller,
            BusEvent::Command(">> 03:44:00".into()),
            InputSource::KeyPress,
            CecLogLevel::Warning,
        );
        handle_bus_event(
            &mut controller,
            BusEvent::KeyPress(KeyPress::new(0x00, 0)),
            InputSource::KeyPress,
            CecLogLevel::Warning,
        );

        assert_eq!(*em.clicks.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_loop_dispatches_until_adapter_closes() {
        // Arrange
        let (mut controller, em) = make_controller();
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(BusEvent::Command(">> 03:44:04".into())).await.unwrap();
        tx.send(BusEvent::Log(log(CecLogLevel::Traffic))).await.unwrap();
        tx.send(BusEvent::Command(">> 03:44:00".into())).await.unwrap();
        tx.send(BusEvent::Closed).await.unwrap();
        tx.send(BusEvent::Command(">> 03:44:00".into())).await.unwrap();

        // Act
        let exit = run_event_loop(
            &mut controller,
            &mut rx,
            InputSource::Command,
            CecLogLevel::Warning,
            std::future::pending(),
        )
        .await;

        // Assert
        assert_eq!(exit, LoopExit::AdapterClosed);
        assert_eq!(*em.moves.lock().unwrap(), vec![(10, 0)]);
        assert_eq!(*em.clicks.lock().unwrap(), 1, "events after Closed are not handled");
    }

    #[tokio::test]
    async fn test_loop_ends_when_senders_are_dropped() {
        let (mut controller, _em) = make_controller();
        let (tx, mut rx) = mpsc::channel::<BusEvent>(1);
        drop(tx);

        let exit = run_event_loop(
            &mut controller,
            &mut rx,
            InputSource::Command,
            CecLogLevel::Warning,
            std::future::pending(),
        )
        .await;

        assert_eq!(exit, LoopExit::ChannelClosed);
    }

    #[tokio::test]
    async fn test_loop_stops_on_shutdown() {
        let (mut controller, _em) = make_controller();
        let (_tx, mut rx) = mpsc::channel::<BusEvent>(1);

        let exit = run_event_loop(
            &mut controller,
            &mut rx,
            InputSource::Command,
            CecLogLevel::Warning,
            async {},
        )
        .await;

        assert_eq!(exit, LoopExit::Shutdown);
    }
}
