//! Clock engine: composes time source, alarm, timer and display format.

use crate::alarm::AlarmState;
use crate::clock::Clock;
use crate::config::ClockConfig;
use crate::format::{DisplayFormatState, HourFormat};
use crate::snapshot::DisplaySnapshot;
use crate::time_source::{TimeSource, WallClockReading};
use crate::timer::TimerState;
use crate::timezone::{self, TimezoneKey};
use crate::ClockError;

/// The single owned clock state.
///
/// [`tick`](Self::tick) is the only operation that advances the edge flags; user actions mutate
/// the components directly between ticks.
///
/// # Example
/// ```
/// use deskclock::{ClockEngine, ManualClock, TimezoneKey};
/// use chrono::{TimeZone, Utc};
///
/// let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 10, 14, 13, 44, 59).unwrap());
/// let mut engine = ClockEngine::new().with_clock(clock.clone());
/// engine.set_timezone(TimezoneKey::Utc);
/// engine.set_alarm(13, 45).unwrap();
///
/// assert!(!engine.tick().should_alert);
/// clock.advance_secs(1);
/// let snapshot = engine.tick();
/// assert!(snapshot.should_alert);
/// assert_eq!(snapshot.alarm_status, "ALARM TRIGGERED!");
/// ```
#[derive(Debug, Clone)]
pub struct ClockEngine {
    time_source: TimeSource,
    alarm: AlarmState,
    timer: TimerState,
    display: DisplayFormatState,
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockEngine {
    /// Engine on the system clock, 24-hour local time.
    pub fn new() -> Self {
        Self::with_config(&ClockConfig::default())
    }

    /// Build from a validated config. The timezone registry is checked here once.
    pub fn with_config(config: &ClockConfig) -> Self {
        let unresolved = timezone::validate();
        tracing::debug!(unresolved = unresolved.len(), "timezone registry validated");
        Self {
            time_source: TimeSource::default(),
            alarm: AlarmState::new(),
            timer: TimerState::new(),
            display: DisplayFormatState::new(config.initial_format(), config.initial_timezone()),
        }
    }

    /// Override the clock (useful for deterministic tests).
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.time_source = TimeSource::new(clock);
        self
    }

    /// Run one update cycle and return what the display should show.
    pub fn tick(&mut self) -> DisplaySnapshot {
        let timer_just_finished = self.timer.tick();
        let reading = self.reading();
        let alarm_just_triggered = self.alarm.check(&reading);
        let should_alert = alarm_just_triggered || timer_just_finished;

        tracing::debug!(
            time = %reading.formatted_time,
            timer = self.timer.remaining_seconds(),
            should_alert,
            "tick"
        );

        DisplaySnapshot {
            hands: reading.hand_angles(),
            time: reading.formatted_time,
            date: reading.date,
            format_label: self.display.format_label().to_string(),
            alarm_status: self.alarm.status_label(),
            timer: self.timer.timer_string(),
            timer_status: self.timer.status_label().to_string(),
            timezone: self.display.timezone().label().to_string(),
            alarm_just_triggered,
            timer_just_finished,
            should_alert,
        }
    }

    /// Current reading in the selected zone and format, without advancing any state.
    pub fn reading(&self) -> WallClockReading {
        self.time_source.now(self.display.timezone(), self.display.format())
    }

    pub fn set_alarm(&mut self, hour: u32, minute: u32) -> Result<(), ClockError> {
        self.alarm.set_alarm(hour, minute)
    }

    pub fn clear_alarm(&mut self) {
        self.alarm.clear_alarm();
    }

    pub fn set_timer(&mut self, hours: u32, minutes: u32, seconds: u32) -> Result<(), ClockError> {
        self.timer.set(hours, minutes, seconds)
    }

    pub fn start_timer(&mut self) -> bool {
        self.timer.start()
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    pub fn toggle_timer(&mut self) {
        self.timer.toggle();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn toggle_format(&mut self) {
        self.display.toggle_format();
    }

    pub fn set_timezone(&mut self, key: TimezoneKey) {
        self.display.set_timezone(key);
    }

    pub fn format(&self) -> HourFormat {
        self.display.format()
    }

    pub fn timezone(&self) -> TimezoneKey {
        self.display.timezone()
    }

    pub fn timezone_keys(&self) -> Vec<&'static str> {
        self.display.timezone_keys()
    }

    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn display_format(&self) -> &DisplayFormatState {
        &self.display
    }
}
