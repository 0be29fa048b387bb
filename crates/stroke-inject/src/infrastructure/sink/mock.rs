//! Recording event sink for tests and dry runs.
//!
//! The real sink talks to a kernel driver that:
//!
//! - Only exists on Windows with Interception installed.
//! - Actually presses keys and moves the cursor on the machine running the test.
//! - Cannot be observed from Rust code.
//!
//! [`RecordingSink`] replaces the driver with in-memory recording.  Every
//! stroke is pushed, with the instant it arrived, into a `Mutex<Vec<...>>` so
//! tests can assert both order and spacing.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return
//! [`SinkError::DeviceUnavailable`], simulating a handle that went away after
//! start-up.

use std::sync::Mutex;
use std::time::Instant;

use stroke_core::{KeyStroke, MouseStroke};

use crate::application::sequencer::{EventSink, SinkError};

/// A stroke as it reached the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStroke {
    Keyboard(KeyStroke),
    Mouse(MouseStroke),
}

/// One recorded call.
#[derive(Debug, Clone, Copy)]
pub struct RecordedStroke {
    pub at: Instant,
    pub stroke: SinkStroke,
}

/// An [`EventSink`] that records all calls without touching any device.
#[derive(Default)]
pub struct RecordingSink {
    /// Every accepted stroke in arrival order.
    pub strokes: Mutex<Vec<RecordedStroke>>,
    /// When `true`, every call fails with [`SinkError::DeviceUnavailable`].
    pub should_fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose device handles are already gone.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of all recorded calls.
    pub fn recorded(&self) -> Vec<RecordedStroke> {
        self.strokes.lock().expect("lock poisoned").clone()
    }

    /// Keyboard strokes only, in arrival order.
    pub fn keyboard_strokes(&self) -> Vec<KeyStroke> {
        self.recorded()
            .into_iter()
            .filter_map(|r| match r.stroke {
                SinkStroke::Keyboard(k) => Some(k),
                SinkStroke::Mouse(_) => None,
            })
            .collect()
    }

    /// Mouse strokes only, in arrival order.
    pub fn mouse_strokes(&self) -> Vec<MouseStroke> {
        self.recorded()
            .into_iter()
            .filter_map(|r| match r.stroke {
                SinkStroke::Mouse(m) => Some(m),
                SinkStroke::Keyboard(_) => None,
            })
            .collect()
    }

    fn record(&self, stroke: SinkStroke) {
        self.strokes.lock().expect("lock poisoned").push(RecordedStroke {
            at: Instant::now(),
            stroke,
        });
    }
}

impl EventSink for RecordingSink {
    fn send_keyboard_stroke(&self, stroke: KeyStroke) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::DeviceUnavailable("keyboard"));
        }
        self.record(SinkStroke::Keyboard(stroke));
        Ok(())
    }

    fn send_mouse_stroke(&self, stroke: MouseStroke) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::DeviceUnavailable("mouse"));
        }
        self.record(SinkStroke::Mouse(stroke));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stroke_core::{KeyBinding, MouseButton};

    #[test]
    fn test_records_keyboard_and_mouse_in_arrival_order() {
        // Arrange
        let sink = RecordingSink::new();
        let key = KeyBinding::base(0x1E).press();
        let click = MouseStroke::button(MouseButton::Button1, true);

        // Act
        sink.send_keyboard_stroke(key).unwrap();
        sink.send_mouse_stroke(click).unwrap();

        // Assert
        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].stroke, SinkStroke::Keyboard(key));
        assert_eq!(recorded[1].stroke, SinkStroke::Mouse(click));
        assert!(recorded[0].at <= recorded[1].at);
        assert_eq!(sink.keyboard_strokes(), vec![key]);
        assert_eq!(sink.mouse_strokes(), vec![click]);
    }

    #[test]
    fn test_failing_sink_records_nothing() {
        let sink = RecordingSink::failing();

        let result = sink.send_keyboard_stroke(KeyBinding::base(0x1E).press());

        assert!(matches!(result, Err(SinkError::DeviceUnavailable("keyboard"))));
        assert!(sink.recorded().is_empty());
    }
}
