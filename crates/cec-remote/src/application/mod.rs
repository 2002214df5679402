//! Application layer use cases.
//!
//! # What use cases are there?
//!
//! - **`dispatch`** – The `Controller`.  Resolves a remote button to an
//!   `Action` and executes it: pointer moves and clicks, scrolling, key
//!   presses, sensitivity steps and shortcut launches.
//!
//! - **`emulate_input`** – The `PlatformInputEmulator` seam through which the
//!   controller injects input.  The real implementation lives in
//!   `infrastructure::input_emulation`.
//!
//! - **`launch_shortcut`** – Reads the `.desktop` file behind a coloured key
//!   and starts its `Exec=` command through a `ProcessLauncher`, optionally
//!   announcing it with a `Notifier`.
//!
//! - **`bus_event`** – The events an adapter backend produces and the loop
//!   that feeds them to the controller.
//!
//! - **`startup`** – Fatal startup conditions and their exit codes.

pub mod bus_event;
pub mod dispatch;
pub mod emulate_input;
pub mod launch_shortcut;
pub mod startup;
