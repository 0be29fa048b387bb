//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the platform
//! config directory (or an explicit path), falls back to defaults on first
//! run, and writes a starter file for `stroke-inject init-config`.

pub mod config;
