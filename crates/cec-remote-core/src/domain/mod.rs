//! Domain entities for cec-remote.
//!
//! Pure business rules with no infrastructure dependencies: what an action
//! is, how the pointer sensitivity steps, and how a shortcut file names the
//! command to launch.

/// The desktop actions a button can trigger.
pub mod action;

/// Bounded pointer-step counter.
pub mod sensitivity;

/// Launch-command extraction from `.desktop` files.
pub mod shortcut;
