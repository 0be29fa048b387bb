//! Application layer use cases.
//!
//! - **`sequencer`** – Expands key, text, and mouse requests into the ordered
//!   stroke stream and hands it to an injected [`sequencer::EventSink`].
//!
//! - **`timing`** – Phase delay defaults and the wait primitive used between
//!   the down-phase and up-phase of a press.

pub mod sequencer;
pub mod timing;

pub use sequencer::{
    EventSink, SequencerError, SinkError, StrokeSequencer, TypingReport, UnmappedPolicy,
};
pub use timing::TimingConfig;
