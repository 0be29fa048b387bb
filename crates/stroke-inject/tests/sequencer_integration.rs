//! Integration tests for the stroke sequencer.
//!
//! These tests drive `StrokeSequencer` end-to-end against the in-memory
//! `RecordingSink` and a `mockall` sink, checking stroke order, phase timing
//! and the batch error policy.

use std::sync::Arc;
use std::time::Duration;

use mockall::predicate::eq;
use mockall::{mock, Sequence};
use uuid::Uuid;

use stroke_core::{KeyBinding, KeyStroke, KeyToken, MouseStroke, ResolveError};
use stroke_inject::application::{
    EventSink, SequencerError, SinkError, StrokeSequencer, TimingConfig, UnmappedPolicy,
};
use stroke_inject::infrastructure::sink::mock::{RecordingSink, SinkStroke};
use stroke_inject::infrastructure::storage::config::{
    load_config_from, save_config_to, InjectorConfig,
};

mock! {
    pub Sink {}

    impl EventSink for Sink {
        fn send_keyboard_stroke(&self, stroke: KeyStroke) -> Result<(), SinkError>;
        fn send_mouse_stroke(&self, stroke: MouseStroke) -> Result<(), SinkError>;
    }
}

fn immediate(sink: Arc<dyn EventSink>) -> StrokeSequencer {
    StrokeSequencer::new(sink).with_timing(TimingConfig::immediate())
}

// ── Ordering and timing ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_keys_finishes_each_cycle_before_the_next_key() {
    // Arrange
    let sink = Arc::new(RecordingSink::new());
    let delay = Duration::from_millis(5);
    let sequencer = StrokeSequencer::new(sink.clone()).with_timing(TimingConfig {
        delay_after_press: delay,
        delay_after_release: delay,
    });

    // Act
    let report = sequencer
        .send_keys(["a", "b"], None, None)
        .await
        .expect("send_keys");

    // Assert
    assert_eq!(report.dispatched, 2);
    let recorded = sink.recorded();
    let a = KeyBinding::base(0x1E);
    let b = KeyBinding::base(0x30);
    let strokes: Vec<SinkStroke> = recorded.iter().map(|r| r.stroke).collect();
    assert_eq!(
        strokes,
        vec![
            SinkStroke::Keyboard(a.press()),
            SinkStroke::Keyboard(a.release()),
            SinkStroke::Keyboard(b.press()),
            SinkStroke::Keyboard(b.release()),
        ]
    );
    assert!(recorded[1].at.duration_since(recorded[0].at) >= delay);
    assert!(recorded[2].at.duration_since(recorded[1].at) >= delay);
}

#[tokio::test]
async fn test_zero_delay_still_separates_consecutive_keys() {
    let sink = Arc::new(RecordingSink::new());
    let sequencer = immediate(sink.clone());

    sequencer.send_keys(["x", "y"], None, None).await.unwrap();

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 4);
    assert!(recorded[2].at.duration_since(recorded[1].at) >= Duration::from_millis(1));
}

#[tokio::test]
async fn test_uppercase_accented_letter_brackets_shift_in_order() {
    // Arrange: Shift down, á down, Shift up, á up, nothing else
    let shift = KeyBinding::base(0x2A);
    let a_acute = KeyBinding::base(0x28);
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    for stroke in [
        shift.press(),
        a_acute.press(),
        shift.release(),
        a_acute.release(),
    ] {
        sink.expect_send_keyboard_stroke()
            .with(eq(stroke))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
    }
    sink.expect_send_mouse_stroke().never();
    let sequencer = immediate(Arc::new(sink));

    // Act / Assert
    sequencer.send_key("Á", None, None).await.expect("send_key");
}

#[tokio::test]
async fn test_print_text_matches_send_key_for_single_character() {
    let typed = Arc::new(RecordingSink::new());
    let pressed = Arc::new(RecordingSink::new());

    immediate(typed.clone())
        .print_text("é", None)
        .await
        .unwrap();
    immediate(pressed.clone())
        .send_key("é", None, None)
        .await
        .unwrap();

    assert_eq!(typed.keyboard_strokes(), pressed.keyboard_strokes());
    assert_eq!(typed.keyboard_strokes().len(), 2);
}

// ── Validation and failures ───────────────────────────────────────────────────

#[tokio::test]
async fn test_click_with_unknown_button_sends_nothing() {
    // Arrange
    let mut sink = MockSink::new();
    sink.expect_send_mouse_stroke().never();
    sink.expect_send_keyboard_stroke().never();
    let sequencer = immediate(Arc::new(sink));

    // Act
    let result = sequencer.click("BUTTON_9", None, None).await;

    // Assert
    assert!(matches!(result, Err(SequencerError::InvalidButton(_))));
}

#[tokio::test]
async fn test_sink_failure_aborts_batch_even_when_skipping_unmapped() {
    let sink = Arc::new(RecordingSink::failing());
    let sequencer = immediate(sink.clone());

    let result = sequencer.print_text("abc", None).await;

    assert!(matches!(
        result,
        Err(SequencerError::Sink(SinkError::DeviceUnavailable("keyboard")))
    ));
    assert!(sink.recorded().is_empty());
}

#[tokio::test]
async fn test_skip_policy_types_around_unmapped_character() {
    let sink = Arc::new(RecordingSink::new());
    let sequencer = immediate(sink.clone());

    let report = sequencer.print_text("a☃b", None).await.unwrap();

    assert_eq!(report.dispatched, 2);
    assert_eq!(report.skipped, vec![KeyToken::Char('☃')]);
    assert!(!report.is_complete());
    assert_eq!(sink.keyboard_strokes().len(), 4);
}

#[tokio::test]
async fn test_abort_policy_stops_at_unmapped_character() {
    let sink = Arc::new(RecordingSink::new());
    let sequencer = immediate(sink.clone()).with_unmapped_policy(UnmappedPolicy::Abort);

    let result = sequencer.print_text("a☃b", None).await;

    assert!(matches!(
        result,
        Err(SequencerError::Resolve(ResolveError::UnmappedCharacter('☃')))
    ));
    // Only the `a` cycle reached the sink.
    assert_eq!(sink.keyboard_strokes().len(), 2);
}

// ── Config wiring ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sequencer_built_from_saved_config_uses_its_timing_and_policy() {
    // Arrange
    let dir = std::env::temp_dir().join(format!("stroke_inject_it_{}", Uuid::new_v4()));
    let path = dir.join("config.toml");
    let mut config = InjectorConfig::default();
    config.timing.delay_after_press_ms = 0;
    config.timing.delay_after_release_ms = 2;
    config.typing.unmapped = UnmappedPolicy::Abort;
    save_config_to(&config, &path).expect("save");

    // Act
    let loaded = load_config_from(&path).expect("load");
    let sequencer = StrokeSequencer::new(Arc::new(RecordingSink::new()))
        .with_timing(loaded.timing.to_timing())
        .with_unmapped_policy(loaded.typing.unmapped);

    // Assert
    assert_eq!(sequencer.timing().delay_after_press, Duration::ZERO);
    assert_eq!(
        sequencer.timing().delay_after_release,
        Duration::from_millis(2)
    );
    assert_eq!(sequencer.unmapped_policy(), UnmappedPolicy::Abort);

    std::fs::remove_dir_all(&dir).ok();
}
