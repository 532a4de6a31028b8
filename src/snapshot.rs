//! Per-tick display output.

use crate::time_source::HandAngles;
use std::fmt;

/// Everything the display layer needs for one tick.
///
/// Produced by [`crate::ClockEngine::tick`]; owns no engine state. The edge flags are true only
/// in the snapshot of the tick where the transition happened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplaySnapshot {
    pub time: String,
    pub date: String,
    pub format_label: String,
    pub alarm_status: String,
    pub timer: String,
    pub timer_status: String,
    pub timezone: String,
    pub hands: HandAngles,
    pub alarm_just_triggered: bool,
    pub timer_just_finished: bool,
    /// `alarm_just_triggered || timer_just_finished`
    pub should_alert: bool,
}

impl fmt::Display for DisplaySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{} | {}] {} | timer {} {}",
            self.time,
            self.date,
            self.timezone,
            self.format_label,
            self.alarm_status,
            self.timer,
            self.timer_status
        )
    }
}
