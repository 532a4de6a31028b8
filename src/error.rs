//! Error types for the clock engine
use std::time::Duration;

/// Unified error type for every fallible engine operation.
///
/// Validation failures are reported to the caller of the mutating operation and leave the
/// previous state untouched. Unresolvable timezones never appear here: they fall back to local
/// time instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Alarm hour/minute outside `0..=23` / `0..=59`.
    #[error("invalid alarm time {hour:02}:{minute:02} (hour must be 0-23, minute 0-59)")]
    InvalidTime { hour: u32, minute: u32 },
    /// Timer fields outside `0..=99` hours, `0..=59` minutes, `0..=59` seconds.
    #[error(
        "invalid timer duration {hours:02}:{minutes:02}:{seconds:02} (hours 0-99, minutes 0-59, seconds 0-59)"
    )]
    InvalidDuration { hours: u32, minutes: u32, seconds: u32 },
    /// A timezone label that is not in the fixed registry.
    #[error("unknown timezone label: {0:?}")]
    UnknownTimezone(String),
    /// Configuration rejected by [`crate::ClockConfig`] validation.
    #[error("invalid config: {0}")]
    InvalidConfig(ConfigError),
    /// The update loop has stopped and no longer accepts commands.
    #[error("update loop is no longer running")]
    LoopClosed,
}

/// Reasons a [`crate::ClockConfig`] fails validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Tick interval must be > 0.
    #[error("tick_interval must be > 0 (got {0:?})")]
    ZeroTickInterval(Duration),
    /// Commands buffered ahead of the loop must be > 0.
    #[error("command_buffer must be > 0 (got {provided})")]
    ZeroCommandBuffer {
        /// Value provided by caller.
        provided: usize,
    },
}

impl From<ConfigError> for ClockError {
    fn from(err: ConfigError) -> Self {
        ClockError::InvalidConfig(err)
    }
}

impl ClockError {
    /// Check if this error is an alarm validation failure
    pub fn is_invalid_time(&self) -> bool {
        matches!(self, Self::InvalidTime { .. })
    }
    /// Check if this error is a timer validation failure
    pub fn is_invalid_duration(&self) -> bool {
        matches!(self, Self::InvalidDuration { .. })
    }
    /// Check if the update loop has gone away
    pub fn is_loop_closed(&self) -> bool {
        matches!(self, Self::LoopClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_display_pads_fields() {
        let err = ClockError::InvalidTime { hour: 24, minute: 5 };
        let msg = err.to_string();
        assert!(msg.contains("24:05"));
        assert!(msg.contains("0-23"));
    }

    #[test]
    fn invalid_duration_display() {
        let err = ClockError::InvalidDuration { hours: 100, minutes: 0, seconds: 0 };
        assert!(err.to_string().contains("100:00:00"));
    }

    #[test]
    fn config_error_converts() {
        let err: ClockError = ConfigError::ZeroTickInterval(Duration::ZERO).into();
        assert!(matches!(err, ClockError::InvalidConfig(ConfigError::ZeroTickInterval(_))));
        assert!(err.to_string().contains("tick_interval"));
    }

    #[test]
    fn predicates_cover_variants() {
        assert!(ClockError::InvalidTime { hour: 0, minute: 60 }.is_invalid_time());
        assert!(!ClockError::InvalidTime { hour: 0, minute: 60 }.is_invalid_duration());
        assert!(ClockError::InvalidDuration { hours: 0, minutes: 60, seconds: 0 }
            .is_invalid_duration());
        assert!(ClockError::LoopClosed.is_loop_closed());
        assert!(!ClockError::UnknownTimezone("Mars".into()).is_loop_closed());
    }
}
