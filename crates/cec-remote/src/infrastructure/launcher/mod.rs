//! Process launcher backed by `tokio::process`.
//!
//! The child is spawned and immediately forgotten.  Tokio reaps it in the
//! background once it exits, so no zombie is left behind and the controller
//! never waits on it.

use std::process::Stdio;

use cec_remote_core::LaunchCommand;
use tokio::process::Command;
use tracing::debug;

use crate::application::launch_shortcut::{LaunchError, ProcessLauncher};

/// Spawns shortcut commands as detached children of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessLauncher;

impl ProcessLauncher for TokioProcessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<(), LaunchError> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })?;
        debug!(pid = ?child.id(), "spawned {}", command.program);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawns_existing_program() {
        let command = LaunchCommand::from_command_line("true").unwrap();
        assert!(TokioProcessLauncher.launch(&command).is_ok());
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let command =
            LaunchCommand::from_command_line("cec-remote-definitely-not-installed --flag").unwrap();
        let err = TokioProcessLauncher.launch(&command).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { ref program, .. } if program == "cec-remote-definitely-not-installed"));
    }
}
