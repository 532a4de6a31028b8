//! Display format and timezone selection.

use crate::timezone::{self, TimezoneKey};

/// 12/24-hour display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HourFormat {
    /// `HH:MM:SS`
    #[default]
    TwentyFour,
    /// `hh:MM:SS AM/PM`
    Twelve,
}

impl HourFormat {
    /// The other format.
    pub fn toggled(self) -> Self {
        match self {
            HourFormat::TwentyFour => HourFormat::Twelve,
            HourFormat::Twelve => HourFormat::TwentyFour,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HourFormat::TwentyFour => "24-Hour",
            HourFormat::Twelve => "12-Hour",
        }
    }

    pub fn is_24_hour(self) -> bool {
        self == HourFormat::TwentyFour
    }

    /// `strftime` pattern for the time-of-day string.
    pub(crate) fn pattern(self) -> &'static str {
        match self {
            HourFormat::TwentyFour => "%H:%M:%S",
            HourFormat::Twelve => "%I:%M:%S %p",
        }
    }
}

/// Format flag plus the selected registry zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFormatState {
    format: HourFormat,
    timezone: TimezoneKey,
}

impl DisplayFormatState {
    pub fn new(format: HourFormat, timezone: TimezoneKey) -> Self {
        Self { format, timezone }
    }

    /// Flip between 24-hour and 12-hour display.
    pub fn toggle_format(&mut self) {
        self.format = self.format.toggled();
        tracing::debug!(format = self.format.label(), "display format toggled");
    }

    pub fn format(&self) -> HourFormat {
        self.format
    }

    pub fn format_label(&self) -> &'static str {
        self.format.label()
    }

    pub fn is_24_hour(&self) -> bool {
        self.format.is_24_hour()
    }

    pub fn set_timezone(&mut self, key: TimezoneKey) {
        self.timezone = key;
        tracing::debug!(timezone = key.label(), "timezone selected");
    }

    pub fn timezone(&self) -> TimezoneKey {
        self.timezone
    }

    /// Labels for the timezone picker.
    pub fn timezone_keys(&self) -> Vec<&'static str> {
        timezone::labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_24_hour_local() {
        let state = DisplayFormatState::default();
        assert!(state.is_24_hour());
        assert_eq!(state.format_label(), "24-Hour");
        assert_eq!(state.timezone(), TimezoneKey::Local);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut state = DisplayFormatState::default();
        state.toggle_format();
        assert_eq!(state.format(), HourFormat::Twelve);
        assert_eq!(state.format_label(), "12-Hour");
        state.toggle_format();
        assert_eq!(state, DisplayFormatState::default());
    }

    #[test]
    fn toggling_leaves_timezone_alone() {
        let mut state = DisplayFormatState::new(HourFormat::Twelve, TimezoneKey::Paris);
        state.toggle_format();
        assert_eq!(state.timezone(), TimezoneKey::Paris);
    }

    #[test]
    fn set_timezone_selects_key() {
        let mut state = DisplayFormatState::default();
        state.set_timezone(TimezoneKey::Tokyo);
        assert_eq!(state.timezone(), TimezoneKey::Tokyo);
        assert_eq!(state.timezone_keys().len(), 6);
    }
}
