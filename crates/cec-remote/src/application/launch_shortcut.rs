//! Launching the program behind a coloured function key.
//!
//! Each coloured key names a `.desktop` file in the shortcut directory.  The
//! file is read every time the key is pressed, so editing a shortcut takes
//! effect without a restart.  A missing file or an `Exec=` line without tokens
//! does nothing at all: the key is simply unassigned.

use std::path::PathBuf;
use std::sync::Arc;

use cec_remote_core::{LaunchCommand, ShortcutSlot};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for process launch operations.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Starts external programs without waiting for them.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, command: &LaunchCommand) -> Result<(), LaunchError>;
}

/// Shows a short-lived, dismissible on-screen message.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn show(&self, summary: &str, body: &str);
}

/// Resolves shortcut slots to commands and launches them.
pub struct ShortcutLauncher {
    directory: PathBuf,
    launcher: Arc<dyn ProcessLauncher>,
    notifier: Arc<dyn Notifier>,
    notify: bool,
}

impl ShortcutLauncher {
    pub fn new(
        directory: PathBuf,
        launcher: Arc<dyn ProcessLauncher>,
        notifier: Arc<dyn Notifier>,
        notify: bool,
    ) -> Self {
        Self {
            directory,
            launcher,
            notifier,
            notify,
        }
    }

    /// Launches the command of `slot`'s shortcut file.
    ///
    /// Returns the launched command, or `None` when nothing was started.
    pub fn launch(&self, slot: ShortcutSlot) -> Option<LaunchCommand> {
        let path = self.directory.join(slot.file_name());
        let contents = std::fs::read_to_string(&path).ok()?;
        let command = LaunchCommand::from_desktop_entry(&contents)?;

        if let Err(e) = self.launcher.launch(&command) {
            debug!("shortcut {} not launched: {e}", path.display());
            return None;
        }

        info!(shortcut = %path.display(), "launched {}", command.program);
        if self.notify {
            self.notifier.show("Starting", &command.display());
        }
        Some(command)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
