//! cec-remote library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does cec-remote do? (for beginners)
//!
//! A single-board computer behind a TV usually has no keyboard or mouse
//! attached.  The TV, however, forwards the buttons of its remote to the
//! active HDMI device over CEC.  cec-remote listens to those presses and
//! turns them into desktop input:
//!
//! 1. Finds and opens the CEC adapter, registering as a tuner device.
//! 2. Receives every button press the TV forwards.
//! 3. Looks the button up in a fixed table.
//! 4. Moves or clicks the pointer, scrolls, presses a key, changes the
//!    pointer step, or launches the program behind a coloured key.

/// Application layer: the controller and its seams.
pub mod application;

/// Infrastructure layer: adapter backend, OS input, processes, config.
pub mod infrastructure;
