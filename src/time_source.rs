//! Current wall-clock readings in the selected zone and format.

use crate::clock::{Clock, SystemClock};
use crate::format::HourFormat;
use crate::timezone::TimezoneKey;
use chrono::{DateTime, Local, TimeZone, Timelike};
use std::fmt::Display;
use std::sync::Arc;

const DATE_PATTERN: &str = "%a, %b %d, %Y";

/// One wall-clock reading, already rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallClockReading {
    /// 0-23 regardless of display format.
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// e.g. `Tue, Oct 14, 2025`
    pub date: String,
    /// `HH:MM:SS` or `hh:MM:SS AM/PM`
    pub formatted_time: String,
}

impl WallClockReading {
    pub fn hand_angles(&self) -> HandAngles {
        HandAngles::at(self.hour, self.minute, self.second)
    }
}

/// Analog hand positions in degrees clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn at(hour: u32, minute: u32, second: u32) -> Self {
        let (h, m, s) = (f64::from(hour % 12), f64::from(minute), f64::from(second));
        Self { hour: h * 30.0 + m / 2.0, minute: m * 6.0 + s / 10.0, second: s * 6.0 }
    }
}

/// Wraps a [`Clock`] and renders readings for a registry zone.
#[derive(Debug, Clone)]
pub struct TimeSource {
    clock: Arc<dyn Clock>,
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl TimeSource {
    pub fn new<C: Clock + 'static>(clock: C) -> Self {
        Self { clock: Arc::new(clock) }
    }

    /// Read the clock in `zone`. Zones that fail to resolve fall back to local time.
    pub fn now(&self, zone: TimezoneKey, format: HourFormat) -> WallClockReading {
        let utc = self.clock.now();
        match zone.resolve() {
            Some(tz) => render(utc.with_timezone(&tz), format),
            None => render(utc.with_timezone(&Local), format),
        }
    }
}

fn render<Z>(at: DateTime<Z>, format: HourFormat) -> WallClockReading
where
    Z: TimeZone,
    Z::Offset: Display,
{
    WallClockReading {
        hour: at.hour(),
        minute: at.minute(),
        second: at.second(),
        date: at.format(DATE_PATTERN).to_string(),
        formatted_time: at.format(format.pattern()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Utc;

    fn source_at(h: u32, m: u32, s: u32) -> TimeSource {
        TimeSource::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 10, 14, h, m, s).unwrap()))
    }

    #[test]
    fn utc_24_hour_reading() {
        let reading = source_at(13, 45, 7).now(TimezoneKey::Utc, HourFormat::TwentyFour);
        assert_eq!((reading.hour, reading.minute, reading.second), (13, 45, 7));
        assert_eq!(reading.formatted_time, "13:45:07");
        assert_eq!(reading.date, "Tue, Oct 14, 2025");
    }

    #[test]
    fn twelve_hour_reading_has_meridiem() {
        let source = source_at(13, 5, 0);
        assert_eq!(source.now(TimezoneKey::Utc, HourFormat::Twelve).formatted_time, "01:05:00 PM");
        let midnight = source_at(0, 0, 9);
        assert_eq!(
            midnight.now(TimezoneKey::Utc, HourFormat::Twelve).formatted_time,
            "12:00:09 AM"
        );
    }

    #[test]
    fn zone_conversion_shifts_hour_and_date() {
        // 2025-10-14 20:30 UTC is 05:30 on the 15th in Tokyo (UTC+9, no DST).
        let reading = source_at(20, 30, 0).now(TimezoneKey::Tokyo, HourFormat::TwentyFour);
        assert_eq!(reading.formatted_time, "05:30:00");
        assert_eq!(reading.date, "Wed, Oct 15, 2025");
    }

    #[test]
    fn new_york_observes_daylight_saving() {
        // October: EDT, UTC-4.
        let reading = source_at(16, 0, 0).now(TimezoneKey::NewYork, HourFormat::TwentyFour);
        assert_eq!(reading.hour, 12);
    }

    #[test]
    fn local_matches_chrono_local() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 14, 8, 15, 30).unwrap();
        let source = TimeSource::new(ManualClock::new(instant));
        let expected = instant.with_timezone(&Local);
        let reading = source.now(TimezoneKey::Local, HourFormat::TwentyFour);
        assert_eq!(reading.hour, expected.hour());
        assert_eq!(reading.minute, expected.minute());
        assert_eq!(reading.formatted_time, expected.format("%H:%M:%S").to_string());
    }

    #[test]
    fn hand_angles_follow_time() {
        let angles = HandAngles::at(15, 30, 0);
        assert_eq!(angles.hour, 105.0);
        assert_eq!(angles.minute, 180.0);
        assert_eq!(angles.second, 0.0);

        let noon = HandAngles::at(12, 0, 30);
        assert_eq!(noon.hour, 0.0);
        assert_eq!(noon.minute, 3.0);
        assert_eq!(noon.second, 180.0);
    }
}
