//! stroke-inject library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The crate turns logical input requests (type this text, press this key,
//! click this button) into ordered keyboard and mouse strokes and hands them
//! to an [`application::EventSink`].  In production the sink is the
//! Interception kernel driver, so the injected input is indistinguishable
//! from a physical keyboard or mouse.

/// Application layer: the stroke sequencer and its timing rules.
pub mod application;

/// Infrastructure layer: event sinks and configuration storage.
pub mod infrastructure;
