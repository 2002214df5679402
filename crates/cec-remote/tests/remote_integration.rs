//! Integration tests for the remote-control pipeline.
//!
//! These tests feed `cec-client` output lines through the line parser, the
//! event loop and the controller, and check the input and launches that come
//! out the other end.  Input goes to `MockInputEmulator`; launches go to a
//! recording launcher.

use std::path::Path;
use std::sync::{Arc, Mutex};

use cec_remote::application::bus_event::{run_event_loop, InputSource, LoopExit};
use cec_remote::application::dispatch::{Controller, ControllerSettings};
use cec_remote::application::launch_shortcut::{LaunchError, Notifier, ProcessLauncher};
use cec_remote::infrastructure::cec_bus::parse::parse_output_line;
use cec_remote::infrastructure::input_emulation::mock::MockInputEmulator;
use cec_remote_core::{CecLogLevel, Key, LaunchCommand};
use tokio::sync::mpsc;

// ── Test doubles ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingLauncher {
    launched: Mutex<Vec<LaunchCommand>>,
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        self.launched.lock().unwrap().push(command.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    shown: Mutex<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn show(&self, summary: &str, body: &str) {
        self.shown
            .lock()
            .unwrap()
            .push((summary.to_owned(), body.to_owned()));
    }
}

struct Harness {
    controller: Controller,
    emulator: Arc<MockInputEmulator>,
    launcher: Arc<RecordingLauncher>,
    notifier: Arc<RecordingNotifier>,
}

fn harness(shortcut_dir: &Path) -> Harness {
    let emulator = Arc::new(MockInputEmulator::new());
    let launcher = Arc::new(RecordingLauncher::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Controller::new(
        Arc::clone(&emulator) as _,
        Arc::clone(&launcher) as _,
        Arc::clone(&notifier) as _,
        ControllerSettings {
            shortcut_dir: shortcut_dir.to_path_buf(),
            scroll_amount: 200,
            notify_on_launch: true,
        },
    );
    Harness {
        controller,
        emulator,
        launcher,
        notifier,
    }
}

/// Runs `output` through the parser and the event loop.
async fn replay(h: &mut Harness, source: InputSource, output: &str) -> LoopExit {
    let (tx, mut rx) = mpsc::channel(64);
    for line in output.lines() {
        for event in parse_output_line(line) {
            tx.send(event).await.unwrap();
        }
    }
    drop(tx);
    run_event_loop(
        &mut h.controller,
        &mut rx,
        source,
        CecLogLevel::Warning,
        std::future::pending(),
    )
    .await
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_traffic_log_drives_pointer_and_keys() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    let output = "\
NOTICE:  [             120]\tCEC client registered: libCEC version = 6.0.2
TRAFFIC: [             300]\t<< 30:47:72:61:73:70:69
TRAFFIC: [             377]\t>> 03:44:04
TRAFFIC: [             480]\t>> 03:45
TRAFFIC: [             512]\t>> 03:44:4b
TRAFFIC: [             600]\t>> 03:44:02
TRAFFIC: [             700]\t>> 0f:44:00
TRAFFIC: [             800]\t>> 03:44:0d
TRAFFIC: [             900]\t>> 03:44:48
TRAFFIC: [             950]\t>> 03:44:00
";

    // Act
    let exit = replay(&mut h, InputSource::Command, output).await;

    // Assert
    assert_eq!(exit, LoopExit::ChannelClosed);
    assert_eq!(*h.emulator.moves.lock().unwrap(), vec![(10, 0), (0, 40)]);
    assert_eq!(*h.emulator.keys.lock().unwrap(), vec![Key::Escape]);
    assert_eq!(*h.emulator.scrolls.lock().unwrap(), vec![-200]);
    assert_eq!(*h.emulator.clicks.lock().unwrap(), 1);
    assert_eq!(h.controller.sensitivity(), 40);
}

#[tokio::test]
async fn test_key_reports_drive_controller_once_per_press() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    let output = "\
DEBUG:   [            2936]\tkey pressed: right (4) current(ff) duration(0)
TRAFFIC: [            2937]\t>> 03:44:04
DEBUG:   [            3043]\tkey released: right (4) D:107ms
";

    // Act
    replay(&mut h, InputSource::KeyPress, output).await;

    // Assert
    assert_eq!(*h.emulator.moves.lock().unwrap(), vec![(10, 0)]);
}

#[tokio::test]
async fn test_coloured_key_launches_shortcut_and_notifies() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("green.desktop"),
        "[Desktop Entry]\nName=Browser\nExec=chromium-browser --kiosk https://example.org\n",
    )
    .unwrap();
    let mut h = harness(dir.path());

    // Act
    replay(
        &mut h,
        InputSource::Command,
        "TRAFFIC: [ 1]\t>> 03:44:73\nTRAFFIC: [ 2]\t>> 03:44:72\n",
    )
    .await;

    // Assert
    let launched = h.launcher.launched.lock().unwrap();
    assert_eq!(launched.len(), 1, "red.desktop does not exist");
    assert_eq!(launched[0].program, "chromium-browser");
    assert_eq!(launched[0].args, vec!["--kiosk", "https://example.org"]);
    assert_eq!(
        *h.notifier.shown.lock().unwrap(),
        vec![(
            "Starting".to_string(),
            "chromium-browser --kiosk https://example.org".to_string()
        )]
    );
    assert!(h.emulator.is_idle());
}

#[tokio::test]
async fn test_adapter_close_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(dir.path());
    let (tx, mut rx) = mpsc::channel(4);
    tx.send(cec_remote::application::bus_event::BusEvent::Closed)
        .await
        .unwrap();

    let exit = run_event_loop(
        &mut h.controller,
        &mut rx,
        InputSource::Command,
        CecLogLevel::Warning,
        std::future::pending(),
    )
    .await;

    assert_eq!(exit, LoopExit::AdapterClosed);
}
