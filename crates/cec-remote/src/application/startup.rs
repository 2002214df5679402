//! Fatal startup conditions.
//!
//! Either condition aborts the process before the event loop starts.  The
//! numeric code becomes the process exit status so that a supervising script
//! can tell them apart.

use thiserror::Error;

/// A condition that prevents the controller from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("No CEC-adapter found")]
    NoAdapter,
    #[error("could not open CEC-adapter {port}: {reason}")]
    OpenFailed { port: String, reason: String },
    #[error("could not create virtual input device: {0}")]
    InputDevice(String),
}

impl StartupError {
    /// Process exit status for this condition.
    pub fn code(&self) -> i32 {
        match self {
            StartupError::NoAdapter => 1,
            StartupError::OpenFailed { .. } => 2,
            StartupError::InputDevice(_) => 3,
        }
    }
}
