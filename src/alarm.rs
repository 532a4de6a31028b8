//! Single daily alarm with minute-granularity matching.

use crate::time_source::WallClockReading;
use crate::ClockError;
use std::fmt;

/// Validated alarm time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmTime {
    hour: u32,
    minute: u32,
}

impl AlarmTime {
    /// Errors with [`ClockError::InvalidTime`] unless `hour <= 23` and `minute <= 59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ClockError> {
        if hour > 23 || minute > 59 {
            return Err(ClockError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Seconds are ignored, so the whole minute matches.
    pub fn matches(&self, reading: &WallClockReading) -> bool {
        reading.hour == self.hour && reading.minute == self.minute
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Status shown next to the alarm controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmStatus {
    Off,
    Set(AlarmTime),
    Triggered,
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmStatus::Triggered => f.write_str("ALARM TRIGGERED!"),
            AlarmStatus::Set(time) => write!(f, "ALARM SET: {}", time),
            AlarmStatus::Off => f.write_str("ALARM OFF"),
        }
    }
}

/// Alarm lifecycle: unarmed → armed (set) → triggered (matching minute) → unarmed (clear).
///
/// `triggered` is sticky so the alarm fires once per arm even though the match window is a whole
/// minute. `just_triggered` is an edge flag valid only until the next [`check`](Self::check).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmState {
    time: Option<AlarmTime>,
    armed: bool,
    triggered: bool,
    just_triggered: bool,
}

impl AlarmState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the alarm. On error nothing changes.
    pub fn set_alarm(&mut self, hour: u32, minute: u32) -> Result<(), ClockError> {
        let time = AlarmTime::new(hour, minute)?;
        self.time = Some(time);
        self.armed = true;
        self.triggered = false;
        self.just_triggered = false;
        tracing::info!(alarm = %time, "alarm set");
        Ok(())
    }

    pub fn clear_alarm(&mut self) {
        *self = Self::default();
        tracing::info!("alarm cleared");
    }

    /// Evaluate against the current reading; returns `true` only on the call that fires.
    pub fn check(&mut self, reading: &WallClockReading) -> bool {
        self.just_triggered = false;
        let Some(time) = self.time else {
            return false;
        };
        if self.armed && !self.triggered && time.matches(reading) {
            self.triggered = true;
            self.just_triggered = true;
            tracing::info!(alarm = %time, at = %reading.formatted_time, "alarm triggered");
        }
        self.just_triggered
    }

    pub fn status(&self) -> AlarmStatus {
        match self.time {
            _ if self.triggered => AlarmStatus::Triggered,
            Some(time) if self.armed => AlarmStatus::Set(time),
            _ => AlarmStatus::Off,
        }
    }

    pub fn status_label(&self) -> String {
        self.status().to_string()
    }

    pub fn alarm_time(&self) -> Option<AlarmTime> {
        self.time
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn just_triggered(&self) -> bool {
        self.just_triggered
    }
}
