//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration file, fills in
//! defaults for everything that is missing, and can write the effective
//! configuration back to disk as a starting point for editing.

pub mod config;
