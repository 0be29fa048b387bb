//! StrokeSequencer: turns logical input requests into ordered driver strokes.
//!
//! This use case sits at the application layer.  It resolves key tokens with
//! `stroke_core`, brackets every key with its modifiers, and hands each stroke
//! to an [`EventSink`] trait object supplied at construction.  The driver-backed
//! sink lives in the infrastructure layer.
//!
//! # Ordering
//!
//! One logical press runs through four steps before the next one starts:
//!
//! ```text
//! down strokes (modifier first) -> after-press delay
//! up strokes   (same order)     -> after-release delay
//! ```
//!
//! Batch operations ([`StrokeSequencer::send_keys`], [`StrokeSequencer::print_text`])
//! run this cycle strictly one token at a time, so a Shift held for one
//! character is always released before the next character is pressed.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stroke_core::{
    keymap::resolve, InvalidButton, KeyBinding, KeyStroke, KeyToken, MouseButton, MouseStroke,
    MoveMode, ResolveError,
};
use thiserror::Error;
use tracing::{debug, warn};

use super::timing::{settle, TimingConfig};

/// Error reported by an [`EventSink`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// The device handle is gone; the sink cannot be used any more.
    #[error("{0} device handle is not available")]
    DeviceUnavailable(&'static str),
    /// The driver accepted the call but did not queue the stroke.
    #[error("driver rejected the stroke: {0}")]
    Rejected(String),
}

/// Error type for sequencer operations.
#[derive(Debug, Error)]
pub enum SequencerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    InvalidButton(#[from] InvalidButton),
    #[error("event sink failure: {0}")]
    Sink(#[from] SinkError),
}

/// Driver-level acceptor of synthesised strokes.
///
/// Calls are a synchronous hand-off into the driver's queue; nothing is
/// returned beyond success or failure.
pub trait EventSink: Send + Sync {
    /// Queues one keyboard stroke.
    fn send_keyboard_stroke(&self, stroke: KeyStroke) -> Result<(), SinkError>;

    /// Queues one mouse stroke.
    fn send_mouse_stroke(&self, stroke: MouseStroke) -> Result<(), SinkError>;
}

/// What a batch does with a token the layout cannot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Log the token, record it in the [`TypingReport`], continue with the next one.
    #[default]
    Skip,
    /// Stop the batch and return the resolution error.
    Abort,
}

/// Outcome of a batch operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingReport {
    /// Tokens whose full press/release cycle was sent.
    pub dispatched: usize,
    /// Tokens skipped because they could not be resolved, in input order.
    pub skipped: Vec<KeyToken>,
}

impl TypingReport {
    /// `true` when no token was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// The Stroke Sequencer use case.
///
/// Owns the event sink and the default phase delays.  The defaults are only
/// changed through [`StrokeSequencer::set_timing`] by the owner.
pub struct StrokeSequencer {
    sink: Arc<dyn EventSink>,
    timing: TimingConfig,
    unmapped: UnmappedPolicy,
}

impl StrokeSequencer {
    /// Creates a sequencer with default timing and [`UnmappedPolicy::Skip`].
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            timing: TimingConfig::default(),
            unmapped: UnmappedPolicy::default(),
        }
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_unmapped_policy(mut self, policy: UnmappedPolicy) -> Self {
        self.unmapped = policy;
        self
    }

    pub fn timing(&self) -> TimingConfig {
        self.timing
    }

    /// Replaces the default phase delays used when a call passes `None`.
    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.timing = timing;
    }

    pub fn unmapped_policy(&self) -> UnmappedPolicy {
        self.unmapped
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    /// Presses and releases whatever keys produce `token`.
    ///
    /// `after_press` / `after_release` override the default delays for this
    /// call only.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Resolve`] without sending anything if the
    /// token cannot be typed, and [`SequencerError::Sink`] if the driver
    /// fails mid-sequence.  Keys pressed before the failure are released
    /// first.
    pub async fn send_key(
        &self,
        token: &str,
        after_press: Option<Duration>,
        after_release: Option<Duration>,
    ) -> Result<(), SequencerError> {
        self.send_token(&KeyToken::parse(token), after_press, after_release)
            .await
    }

    /// Sends each token in turn, completing one full cycle before the next.
    ///
    /// # Errors
    ///
    /// Sink failures always stop the batch.  Unresolvable tokens stop it only
    /// under [`UnmappedPolicy::Abort`]; otherwise they are listed in the
    /// returned [`TypingReport`].
    pub async fn send_keys<I, S>(
        &self,
        tokens: I,
        after_press: Option<Duration>,
        after_release: Option<Duration>,
    ) -> Result<TypingReport, SequencerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|token| KeyToken::parse(token.as_ref()));
        self.run_batch(tokens, after_press, after_release).await
    }

    /// Presses (`pressed == true`) or releases the keys behind `token`,
    /// without the opposite phase and without any delay.
    ///
    /// Use a pair of calls to hold a key across other presses, e.g. Shift
    /// around several [`send_key`](Self::send_key) calls.
    ///
    /// # Errors
    ///
    /// Same as [`send_key`](Self::send_key).
    pub fn toggle_key(&self, token: &str, pressed: bool) -> Result<(), SequencerError> {
        let token = KeyToken::parse(token);
        let bindings = self.resolve_reported(&token)?;
        debug!(%token, pressed, keys = bindings.len(), "toggling key");
        if pressed {
            self.press_all(&bindings)
        } else {
            self.release_all(&bindings)
        }
    }

    /// Types `text` one Unicode scalar value at a time.
    ///
    /// Each character is held for the default after-press delay;
    /// `delay_between_chars` is the after-release delay between characters.
    ///
    /// # Errors
    ///
    /// Same as [`send_keys`](Self::send_keys).
    pub async fn print_text(
        &self,
        text: &str,
        delay_between_chars: Option<Duration>,
    ) -> Result<TypingReport, SequencerError> {
        debug!(chars = text.chars().count(), "typing text");
        self.run_batch(
            text.chars().map(KeyToken::Char),
            Some(self.timing.delay_after_press),
            delay_between_chars,
        )
        .await
    }

    async fn send_token(
        &self,
        token: &KeyToken,
        after_press: Option<Duration>,
        after_release: Option<Duration>,
    ) -> Result<(), SequencerError> {
        let bindings = self.resolve_reported(token)?;
        debug!(%token, keys = bindings.len(), "sending key");

        self.press_all(&bindings)?;
        settle(self.timing.press_delay(after_press)).await;

        self.release_all(&bindings)?;
        settle(self.timing.release_delay(after_release)).await;

        Ok(())
    }

    /// Sends the down-strokes in order.
    ///
    /// If the sink fails part-way, the keys already pressed are released
    /// again, last first, so no modifier stays down on the host.
    fn press_all(&self, bindings: &[KeyBinding]) -> Result<(), SequencerError> {
        for (pressed, binding) in bindings.iter().enumerate() {
            if let Err(e) = self.sink.send_keyboard_stroke(binding.press()) {
                for held in bindings[..pressed].iter().rev() {
                    if let Err(release_err) = self.sink.send_keyboard_stroke(held.release()) {
                        warn!(code = held.code, "release after failed press: {release_err}");
                    }
                }
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Sends every up-stroke in order, even after a failure, and returns the
    /// first error.
    fn release_all(&self, bindings: &[KeyBinding]) -> Result<(), SequencerError> {
        let mut first_error = None;
        for binding in bindings {
            if let Err(e) = self.sink.send_keyboard_stroke(binding.release()) {
                warn!(code = binding.code, "key release failed: {e}");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    async fn run_batch(
        &self,
        tokens: impl Iterator<Item = KeyToken>,
        after_press: Option<Duration>,
        after_release: Option<Duration>,
    ) -> Result<TypingReport, SequencerError> {
        let mut report = TypingReport::default();
        for token in tokens {
            match self.send_token(&token, after_press, after_release).await {
                Ok(()) => report.dispatched += 1,
                Err(SequencerError::Resolve(_)) if self.unmapped == UnmappedPolicy::Skip => {
                    report.skipped.push(token);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    /// Resolves a token, logging the failure before handing it back.
    fn resolve_reported(&self, token: &KeyToken) -> Result<Vec<KeyBinding>, SequencerError> {
        resolve(token).map_err(|e| {
            warn!(%token, "no key strokes for input: {e}");
            SequencerError::from(e)
        })
    }

    // ── Mouse ─────────────────────────────────────────────────────────────────

    /// Moves the cursor by (`Relative`) or to (`Absolute`) `x`, `y`.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Sink`] if the driver fails.
    pub fn move_cursor(&self, x: i32, y: i32, mode: MoveMode) -> Result<(), SequencerError> {
        debug!(x, y, ?mode, "moving cursor");
        self.sink
            .send_mouse_stroke(MouseStroke::movement(x, y, mode))?;
        Ok(())
    }

    /// Clicks the button named `button` (`"BUTTON_1"` .. `"BUTTON_5"`).
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidButton`] before sending anything if
    /// the name is not recognised.
    pub async fn click(
        &self,
        button: &str,
        after_press: Option<Duration>,
        after_release: Option<Duration>,
    ) -> Result<(), SequencerError> {
        let button: MouseButton = button.parse()?;
        self.click_button(button, after_press, after_release).await
    }

    /// Presses, waits, releases, waits.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Sink`] if the driver fails.
    pub async fn click_button(
        &self,
        button: MouseButton,
        after_press: Option<Duration>,
        after_release: Option<Duration>,
    ) -> Result<(), SequencerError> {
        debug!(%button, "clicking");
        self.sink.send_mouse_stroke(MouseStroke::button(button, true))?;
        settle(self.timing.press_delay(after_press)).await;
        self.sink.send_mouse_stroke(MouseStroke::button(button, false))?;
        settle(self.timing.release_delay(after_release)).await;
        Ok(())
    }

    /// Presses or releases the button named `button`, without delay.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidButton`] before sending anything if
    /// the name is not recognised.
    pub fn toggle_button(&self, button: &str, pressed: bool) -> Result<(), SequencerError> {
        let button: MouseButton = button.parse()?;
        self.set_button_state(button, pressed)
    }

    /// Typed form of [`toggle_button`](Self::toggle_button).
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Sink`] if the driver fails.
    pub fn set_button_state(&self, button: MouseButton, pressed: bool) -> Result<(), SequencerError> {
        debug!(%button, pressed, "toggling button");
        self.sink
            .send_mouse_stroke(MouseStroke::button(button, pressed))?;
        Ok(())
    }

    /// Rolls the vertical wheel; positive scrolls up.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Sink`] if the driver fails.
    pub fn scroll_wheel(&self, amount: i16) -> Result<(), SequencerError> {
        self.sink.send_mouse_stroke(MouseStroke::wheel(amount))?;
        Ok(())
    }

    /// Rolls the horizontal wheel; positive scrolls right.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Sink`] if the driver fails.
    pub fn scroll_wheel_horizontal(&self, amount: i16) -> Result<(), SequencerError> {
        self.sink
            .send_mouse_stroke(MouseStroke::horizontal_wheel(amount))?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
