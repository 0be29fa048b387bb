//! Phase timing for synthesised key presses and clicks.
//!
//! Every logical press has two phases.  After the down-phase the sequencer
//! pauses for the *after-press* delay, after the up-phase for the
//! *after-release* delay.  Applications polling the keyboard state need the
//! key to stay down for a moment, and need a gap before the next key.
//!
//! A zero delay does not mean "no pause": [`settle`] still waits for
//! [`MIN_SCHEDULING_QUANTUM`] so two logical presses never reach the driver in
//! the same instant.  That wait spins instead of yielding, since a sub-millisecond
//! sleep would be rounded up to the timer resolution.

use std::time::{Duration, Instant};

/// Default pause after the down-phase.
pub const DEFAULT_DELAY_AFTER_PRESS: Duration = Duration::from_millis(50);

/// Default pause after the up-phase.
pub const DEFAULT_DELAY_AFTER_RELEASE: Duration = Duration::from_millis(50);

/// Shortest pause between phases, used when the effective delay is zero.
pub const MIN_SCHEDULING_QUANTUM: Duration = Duration::from_millis(1);

/// Default phase delays held by a sequencer.
///
/// Per-call overrides take precedence; see [`TimingConfig::press_delay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub delay_after_press: Duration,
    pub delay_after_release: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            delay_after_press: DEFAULT_DELAY_AFTER_PRESS,
            delay_after_release: DEFAULT_DELAY_AFTER_RELEASE,
        }
    }
}

impl TimingConfig {
    /// Zero delays; every phase falls back to [`MIN_SCHEDULING_QUANTUM`].
    pub const fn immediate() -> Self {
        Self {
            delay_after_press: Duration::ZERO,
            delay_after_release: Duration::ZERO,
        }
    }

    /// Effective after-press delay for one call.
    pub fn press_delay(&self, per_call: Option<Duration>) -> Duration {
        per_call.unwrap_or(self.delay_after_press)
    }

    /// Effective after-release delay for one call.
    pub fn release_delay(&self, per_call: Option<Duration>) -> Duration {
        per_call.unwrap_or(self.delay_after_release)
    }
}

/// Pauses between phases.
///
/// Non-zero delays yield to the runtime; a zero delay busy-waits for
/// [`MIN_SCHEDULING_QUANTUM`].
pub async fn settle(delay: Duration) {
    if delay.is_zero() {
        spin_for(MIN_SCHEDULING_QUANTUM);
    } else {
        tokio::time::sleep(delay).await;
    }
}

/// Non-yielding wait.
fn spin_for(duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays_are_50ms() {
        let timing = TimingConfig::default();
        assert_eq!(timing.delay_after_press, Duration::from_millis(50));
        assert_eq!(timing.delay_after_release, Duration::from_millis(50));
    }

    #[test]
    fn test_per_call_override_takes_precedence() {
        // Arrange
        let timing = TimingConfig::default();

        // Act / Assert
        assert_eq!(timing.press_delay(Some(Duration::from_millis(5))), Duration::from_millis(5));
        assert_eq!(timing.release_delay(None), Duration::from_millis(50));
    }

    #[test]
    fn test_zero_override_is_not_replaced_by_default() {
        // An explicit zero must stay zero so `settle` can apply the quantum.
        let timing = TimingConfig::default();
        assert_eq!(timing.press_delay(Some(Duration::ZERO)), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_settle_zero_still_waits_one_quantum() {
        let start = Instant::now();
        settle(Duration::ZERO).await;
        assert!(start.elapsed() >= MIN_SCHEDULING_QUANTUM);
    }

    #[tokio::test]
    async fn test_settle_sleeps_for_requested_delay() {
        let start = Instant::now();
        settle(Duration::from_millis(10)).await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
