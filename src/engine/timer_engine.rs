//! Timer state machine

use tracing::{debug, info, warn};

use super::{TickOutcome, TimerError, TimerEvent, TimerSnapshot};
use crate::{
    codec::{self, MAX_SECONDS},
    input::{self, MaskedText},
    notify::{NotificationSink, TIMES_UP},
    state::{TimerPhase, TimerState},
};

/// Countdown engine owning a single timer's state and its alert sink
#[derive(Debug)]
pub struct TimerEngine<N> {
    state: TimerState,
    sink: N,
}

impl<N: NotificationSink> TimerEngine<N> {
    /// Create an idle engine
    pub fn new(sink: N) -> Self {
        Self {
            state: TimerState::new(),
            sink,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&self.state)
    }

    /// Apply live typing to the display buffer
    pub fn edit_display(&mut self, raw: &str) -> Result<MaskedText, TimerError> {
        if self.state.phase != TimerPhase::Idle {
            return Err(TimerError::NotIdle);
        }

        let masked = input::reformat(raw);
        self.state.display = masked.text.clone();
        Ok(masked)
    }

    /// Validate `text` and begin counting down from it.
    ///
    /// Fails without touching any state when the text does not parse, when it
    /// is not in `1..=MAX_SECONDS`, or when a countdown is already active.
    pub fn start(&mut self, text: &str) -> Result<TimerEvent, TimerError> {
        if self.state.is_active() {
            warn!("Ignoring start while a countdown is already active");
            return Err(TimerError::AlreadyActive);
        }

        let masked = input::reformat(text);
        let seconds = codec::parse(&masked.text)?;
        if seconds <= 0 || seconds > i64::from(MAX_SECONDS) {
            return Err(TimerError::InvalidDuration { seconds });
        }

        let seconds = seconds as u32;
        self.state = TimerState::running(seconds);
        info!("Countdown started for {} ({}s)", self.state.display, seconds);
        Ok(TimerEvent::Started { seconds })
    }

    /// Deliver one periodic tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.ticking {
            return TickOutcome::Cancelled;
        }
        if self.state.is_paused() {
            return TickOutcome::Skipped;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.state.display = codec::format(self.state.remaining_seconds);
        debug!("Tick: {} remaining", self.state.display);

        if self.state.remaining_seconds > 0 {
            return TickOutcome::Counted(TimerEvent::Tick {
                remaining_seconds: self.state.remaining_seconds,
                display: self.state.display.clone(),
            });
        }

        self.state.ticking = false;
        self.state.phase = TimerPhase::Finished;
        info!("Countdown finished");
        self.sink.notify();
        self.reset();

        TickOutcome::Finished(TimerEvent::Finished {
            notice: TIMES_UP.to_string(),
        })
    }

    pub fn pause(&mut self) -> Result<TimerEvent, TimerError> {
        if self.state.phase != TimerPhase::Running {
            return Err(TimerError::NotRunning);
        }

        self.state.phase = TimerPhase::Paused;
        info!("Countdown paused at {}", self.state.display);
        Ok(TimerEvent::Paused {
            remaining_seconds: self.state.remaining_seconds,
        })
    }

    pub fn resume(&mut self) -> Result<TimerEvent, TimerError> {
        if self.state.phase != TimerPhase::Paused {
            return Err(TimerError::NotPaused);
        }

        self.state.phase = TimerPhase::Running;
        info!("Countdown resumed at {}", self.state.display);
        Ok(TimerEvent::Resumed {
            remaining_seconds: self.state.remaining_seconds,
        })
    }

    /// Cancel the countdown and return to idle
    pub fn stop(&mut self) -> Result<TimerEvent, TimerError> {
        if !self.state.is_active() {
            return Err(TimerError::NotActive);
        }

        info!("Countdown stopped at {}", self.state.display);
        self.reset();
        Ok(TimerEvent::Stopped)
    }

    fn reset(&mut self) {
        self.state = TimerState::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[derive(Debug, Default)]
    struct RecordingSink {
        calls: AtomicUsize,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn engine() -> (TimerEngine<Arc<RecordingSink>>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (TimerEngine::new(Arc::clone(&sink)), sink)
    }

    #[test]
    fn starts_idle() {
        let (engine, _) = engine();
        assert_eq!(engine.state().phase, TimerPhase::Idle);
        assert_eq!(engine.state().remaining_seconds, 0);
        assert_eq!(engine.state().display, "00:00:00");
    }

    #[test]
    fn zero_and_malformed_durations_stay_idle() {
        let (mut engine, _) = engine();

        for text in ["00:00:00", "", "12", "abc"] {
            let err = engine.start(text).unwrap_err();
            assert!(err.is_validation(), "{text}: {err:?}");
            assert_eq!(err.notice(), crate::engine::INVALID_DURATION_NOTICE);
            assert_eq!(engine.state(), &TimerState::new());
        }
    }

    #[test]
    fn start_reformats_before_parsing() {
        let (mut engine, _) = engine();
        assert_eq!(engine.start("000130"), Ok(TimerEvent::Started { seconds: 90 }));
        assert_eq!(engine.state().display, "00:01:30");
    }

    #[test]
    fn overlong_fields_are_normalised_on_display() {
        let (mut engine, _) = engine();
        engine.start("00:90:00").unwrap();
        assert_eq!(engine.state().remaining_seconds, 5400);
        assert_eq!(engine.state().display, "01:30:00");
    }

    #[test]
    fn rejects_durations_past_two_digit_hours() {
        let (mut engine, _) = engine();
        let err = engine.start("99:99:99").unwrap_err();
        assert_eq!(err, TimerError::InvalidDuration { seconds: 362_439 });
        assert_eq!(engine.state().phase, TimerPhase::Idle);
    }

    #[test]
    fn counts_down_to_finish_and_notifies_once() {
        let (mut engine, sink) = engine();
        engine.start("00:00:02").unwrap();

        let outcome = engine.tick();
        assert!(outcome.keeps_ticking());
        assert_eq!(engine.state().remaining_seconds, 1);
        assert_eq!(engine.state().display, "00:00:01");

        let outcome = engine.tick();
        assert_eq!(
            outcome,
            TickOutcome::Finished(TimerEvent::Finished { notice: TIMES_UP.to_string() })
        );
        assert_eq!(engine.state(), &TimerState::new());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);

        assert_eq!(engine.tick(), TickOutcome::Cancelled);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn paused_ticks_do_not_count() {
        let (mut engine, _) = engine();
        engine.start("00:00:10").unwrap();
        engine.tick();
        engine.pause().unwrap();

        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::Skipped);
        }
        assert_eq!(engine.state().remaining_seconds, 9);

        engine.resume().unwrap();
        engine.tick();
        assert_eq!(engine.state().remaining_seconds, 8);
    }

    #[test]
    fn ticks_after_stop_change_nothing() {
        let (mut engine, sink) = engine();
        engine.start("00:00:05").unwrap();
        engine.tick();
        assert_eq!(engine.stop(), Ok(TimerEvent::Stopped));

        for _ in 0..10 {
            assert_eq!(engine.tick(), TickOutcome::Cancelled);
        }
        assert_eq!(engine.state(), &TimerState::new());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stop_from_paused_resets() {
        let (mut engine, _) = engine();
        engine.start("00:01:00").unwrap();
        engine.pause().unwrap();
        engine.stop().unwrap();
        assert_eq!(engine.state().phase, TimerPhase::Idle);
        assert_eq!(engine.state().display, "00:00:00");
    }

    #[test]
    fn restart_while_active_is_rejected() {
        let (mut engine, _) = engine();
        engine.start("00:00:30").unwrap();
        engine.tick();

        assert_eq!(engine.start("00:10:00"), Err(TimerError::AlreadyActive));
        assert_eq!(engine.state().remaining_seconds, 29);

        engine.pause().unwrap();
        assert_eq!(engine.start("00:10:00"), Err(TimerError::AlreadyActive));
        assert_eq!(engine.state().phase, TimerPhase::Paused);
    }

    #[test]
    fn transitions_from_wrong_phase_fail() {
        let (mut engine, _) = engine();
        assert_eq!(engine.pause(), Err(TimerError::NotRunning));
        assert_eq!(engine.resume(), Err(TimerError::NotPaused));
        assert_eq!(engine.stop(), Err(TimerError::NotActive));

        engine.start("00:00:03").unwrap();
        assert_eq!(engine.resume(), Err(TimerError::NotPaused));
        engine.pause().unwrap();
        assert_eq!(engine.pause(), Err(TimerError::NotRunning));
    }

    #[test]
    fn display_edits_are_masked_and_idle_only() {
        let (mut engine, _) = engine();
        let masked = engine.edit_display("1234567").unwrap();
        assert_eq!(masked, MaskedText { text: "12:34:56".to_string(), caret: 8 });
        assert_eq!(engine.state().display, "12:34:56");

        engine.start("00:00:05").unwrap();
        assert_eq!(engine.edit_display("1"), Err(TimerError::NotIdle));
        assert_eq!(engine.state().display, "00:00:05");
    }
}
