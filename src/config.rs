//! Engine and update-loop configuration.

use crate::error::ConfigError;
use crate::format::HourFormat;
use crate::timezone::TimezoneKey;
use std::time::Duration;

/// Nominal tick cadence.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
/// Commands queued ahead of the update loop before senders wait.
pub const DEFAULT_COMMAND_BUFFER: usize = 32;

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    tick_interval: Duration,
    command_buffer: usize,
    initial_format: HourFormat,
    initial_timezone: TimezoneKey,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            command_buffer: DEFAULT_COMMAND_BUFFER,
            initial_format: HourFormat::TwentyFour,
            initial_timezone: TimezoneKey::Local,
        }
    }
}

impl ClockConfig {
    pub fn builder() -> ClockConfigBuilder {
        ClockConfigBuilder::default()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn command_buffer(&self) -> usize {
        self.command_buffer
    }

    pub fn initial_format(&self) -> HourFormat {
        self.initial_format
    }

    pub fn initial_timezone(&self) -> TimezoneKey {
        self.initial_timezone
    }
}

/// Builder for [`ClockConfig`]; values are checked in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ClockConfigBuilder {
    config: ClockConfig,
}

impl ClockConfigBuilder {
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval = interval;
        self
    }

    pub fn command_buffer(mut self, capacity: usize) -> Self {
        self.config.command_buffer = capacity;
        self
    }

    pub fn initial_format(mut self, format: HourFormat) -> Self {
        self.config.initial_format = format;
        self
    }

    pub fn initial_timezone(mut self, timezone: TimezoneKey) -> Self {
        self.config.initial_timezone = timezone;
        self
    }

    pub fn build(self) -> Result<ClockConfig, ConfigError> {
        if self.config.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval(self.config.tick_interval));
        }
        if self.config.command_buffer == 0 {
            return Err(ConfigError::ZeroCommandBuffer { provided: 0 });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_nominal_cadence() {
        let config = ClockConfig::builder().build().unwrap();
        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.initial_format(), HourFormat::TwentyFour);
        assert_eq!(config.initial_timezone(), TimezoneKey::Local);
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let err = ClockConfig::builder().tick_interval(Duration::ZERO).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroTickInterval(Duration::ZERO));
    }

    #[test]
    fn rejects_zero_command_buffer() {
        let err = ClockConfig::builder().command_buffer(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCommandBuffer { provided: 0 }));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ClockConfig::builder()
            .tick_interval(Duration::from_millis(250))
            .command_buffer(4)
            .initial_format(HourFormat::Twelve)
            .initial_timezone(TimezoneKey::Utc)
            .build()
            .unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.command_buffer(), 4);
        assert_eq!(config.initial_format(), HourFormat::Twelve);
        assert_eq!(config.initial_timezone(), TimezoneKey::Utc);
    }
}
