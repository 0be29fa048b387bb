//! Infrastructure layer for the injector.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `stroke_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`sink`** – [`EventSink`](crate::application::EventSink) implementations.
//!   The Interception driver sink is compiled on Windows only; a
//!   `RecordingSink` is provided everywhere for tests.
//!
//! - **`storage`** – TOML configuration file loading and saving.

pub mod sink;
pub mod storage;
