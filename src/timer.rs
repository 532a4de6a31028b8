//! Countdown timer with one-second resolution.

use crate::ClockError;
use std::fmt;

const MAX_HOURS: u32 = 99;

/// Validated `HH:MM:SS` countdown length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDuration {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl TimerDuration {
    /// Errors with [`ClockError::InvalidDuration`] unless hours <= 99, minutes <= 59 and
    /// seconds <= 59.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, ClockError> {
        if hours > MAX_HOURS || minutes > 59 || seconds > 59 {
            return Err(ClockError::InvalidDuration { hours, minutes, seconds });
        }
        Ok(Self { hours, minutes, seconds })
    }

    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Status shown next to the timer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// No duration configured.
    Off,
    /// Duration configured, not counting.
    Ready,
    Running,
    Finished,
}

impl TimerStatus {
    pub fn label(self) -> &'static str {
        match self {
            TimerStatus::Finished => "TIMER FINISHED!",
            TimerStatus::Running => "RUNNING",
            TimerStatus::Ready => "READY",
            TimerStatus::Off => "OFF",
        }
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Countdown lifecycle: OFF → set → READY → start → RUNNING → tick to 0 → FINISHED.
///
/// Invariants: `remaining <= total`; `finished` implies `remaining == 0` and not running.
/// `just_finished` is an edge flag valid only until the next [`tick`](Self::tick).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
    finished: bool,
    just_finished: bool,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a new countdown, stopping any current one. On error nothing changes.
    pub fn set(&mut self, hours: u32, minutes: u32, seconds: u32) -> Result<(), ClockError> {
        let duration = TimerDuration::new(hours, minutes, seconds)?;
        self.total_seconds = duration.total_seconds();
        self.remaining_seconds = self.total_seconds;
        self.running = false;
        self.finished = false;
        self.just_finished = false;
        tracing::info!(total_seconds = self.total_seconds, "timer set");
        Ok(())
    }

    /// Start counting down; no-op unless time remains and the timer is stopped.
    /// Returns whether the timer started.
    pub fn start(&mut self) -> bool {
        if self.remaining_seconds == 0 || self.running {
            return false;
        }
        self.running = true;
        self.finished = false;
        self.just_finished = false;
        tracing::info!(remaining_seconds = self.remaining_seconds, "timer started");
        true
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::info!(remaining_seconds = self.remaining_seconds, "timer stopped");
        }
        self.running = false;
    }

    /// Restore the last configured duration and clear all flags.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.running = false;
        self.finished = false;
        self.just_finished = false;
        tracing::info!(total_seconds = self.total_seconds, "timer reset");
    }

    /// Start/stop button: RUNNING stops, READY or FINISHED starts, OFF does nothing.
    pub fn toggle(&mut self) {
        match self.status() {
            TimerStatus::Running => self.stop(),
            TimerStatus::Ready | TimerStatus::Finished => {
                self.start();
            }
            TimerStatus::Off => {}
        }
    }

    /// Advance one second. Returns `true` only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        self.just_finished = false;
        if self.running && self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            if self.remaining_seconds == 0 {
                self.running = false;
                self.finished = true;
                self.just_finished = true;
                tracing::info!(total_seconds = self.total_seconds, "timer finished");
            }
        }
        self.just_finished
    }

    pub fn status(&self) -> TimerStatus {
        if self.finished {
            TimerStatus::Finished
        } else if self.running {
            TimerStatus::Running
        } else if self.total_seconds > 0 {
            TimerStatus::Ready
        } else {
            TimerStatus::Off
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status().label()
    }

    /// Remaining time as `HH:MM:SS`.
    pub fn timer_string(&self) -> String {
        let secs = self.remaining_seconds;
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn just_finished(&self) -> bool {
        self.just_finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_off() {
        let timer = TimerState::new();
        assert_eq!(timer.status(), TimerStatus::Off);
        assert_eq!(timer.timer_string(), "00:00:00");
    }

    #[test]
    fn timer_string_matches_input_for_valid_durations() {
        let mut timer = TimerState::new();
        for (h, m, s) in [(0, 0, 0), (0, 0, 1), (1, 2, 3), (12, 59, 0), (99, 59, 59)] {
            timer.set(h, m, s).unwrap();
            assert_eq!(timer.timer_string(), format!("{:02}:{:02}:{:02}", h, m, s));
        }
    }

    #[test]
    fn rejects_invalid_fields_without_mutation() {
        let mut timer = TimerState::new();
        timer.set(0, 5, 0).unwrap();
        timer.start();
        timer.tick();
        let before = timer.clone();

        for (h, m, s) in [(100, 0, 0), (0, 60, 0), (0, 0, 60)] {
            let err = timer.set(h, m, s).unwrap_err();
            assert_eq!(err, ClockError::InvalidDuration { hours: h, minutes: m, seconds: s });
        }
        assert_eq!(timer, before);
    }

    #[test]
    fn one_second_timer_finishes_on_first_tick() {
        let mut timer = TimerState::new();
        timer.set(0, 0, 1).unwrap();
        assert_eq!(timer.status_label(), "READY");
        assert!(timer.start());
        assert_eq!(timer.status_label(), "RUNNING");

        assert!(timer.tick());
        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.status_label(), "TIMER FINISHED!");
        assert!(timer.just_finished());
        assert!(!timer.is_running());

        assert!(!timer.tick());
        assert!(!timer.just_finished());
        assert_eq!(timer.status_label(), "TIMER FINISHED!");
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = TimerState::new();
        timer.set(0, 1, 0).unwrap();
        timer.start();
        timer.tick();
        timer.stop();
        let stopped = timer.clone();
        timer.stop();
        assert_eq!(timer, stopped);
        assert_eq!(timer.status(), TimerStatus::Ready);
        assert_eq!(timer.remaining_seconds(), 59);
    }

    #[test]
    fn ticks_are_noops_when_stopped() {
        let mut timer = TimerState::new();
        timer.set(0, 0, 10).unwrap();
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds(), 10);
    }

    #[test]
    fn start_with_nothing_remaining_is_noop() {
        let mut timer = TimerState::new();
        assert!(!timer.start());
        assert_eq!(timer.status_label(), "OFF");

        timer.set(0, 0, 0).unwrap();
        assert!(!timer.start());
        assert_eq!(timer.status_label(), "OFF");

        timer.set(0, 0, 1).unwrap();
        timer.start();
        timer.tick();
        assert!(!timer.start());
        assert_eq!(timer.status_label(), "TIMER FINISHED!");
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = TimerState::new();
        timer.set(0, 0, 5).unwrap();
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());
    }

    #[test]
    fn reset_restores_configured_duration() {
        let mut timer = TimerState::new();
        timer.set(0, 0, 2).unwrap();
        timer.start();
        timer.tick();
        timer.tick();
        assert!(timer.is_finished());

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 2);
        assert_eq!(timer.total_seconds(), 2);
        assert_eq!(timer.status_label(), "READY");
        assert!(!timer.just_finished());
        assert!(timer.start());
    }

    #[test]
    fn reset_unset_timer_stays_off() {
        let mut timer = TimerState::new();
        timer.reset();
        assert_eq!(timer.status(), TimerStatus::Off);
    }

    #[test]
    fn toggle_follows_button_semantics() {
        let mut timer = TimerState::new();
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Off);

        timer.set(0, 0, 3).unwrap();
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Running);
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Ready);

        timer.set(0, 0, 1).unwrap();
        timer.toggle();
        timer.tick();
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Finished, "finished with 0 remaining cannot start");
    }

    #[test]
    fn countdown_preserves_invariants() {
        let mut timer = TimerState::new();
        timer.set(0, 1, 5).unwrap();
        timer.start();
        for _ in 0..100 {
            timer.tick();
            assert!(timer.remaining_seconds() <= timer.total_seconds());
            if timer.is_finished() {
                assert_eq!(timer.remaining_seconds(), 0);
                assert!(!timer.is_running());
            }
        }
        assert!(timer.is_finished());
    }
}
