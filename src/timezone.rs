//! Fixed timezone registry.
//!
//! The registry is a closed set: every selectable zone is a [`TimezoneKey`] variant with a
//! display label and an optional IANA identifier (`None` means system local time).

use crate::ClockError;
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// One entry of the fixed timezone registry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimezoneKey {
    /// System local time.
    #[default]
    Local,
    Utc,
    NewYork,
    LosAngeles,
    Paris,
    Tokyo,
}

impl TimezoneKey {
    /// Every registry entry in display order.
    pub const ALL: [TimezoneKey; 6] = [
        TimezoneKey::Local,
        TimezoneKey::Utc,
        TimezoneKey::NewYork,
        TimezoneKey::LosAngeles,
        TimezoneKey::Paris,
        TimezoneKey::Tokyo,
    ];

    /// Display label shown in the timezone picker.
    pub fn label(self) -> &'static str {
        match self {
            TimezoneKey::Local => "Local Time",
            TimezoneKey::Utc => "UTC",
            TimezoneKey::NewYork => "EST (New York)",
            TimezoneKey::LosAngeles => "PST (Los Angeles)",
            TimezoneKey::Paris => "CET (Paris)",
            TimezoneKey::Tokyo => "JST (Tokyo)",
        }
    }

    /// IANA zone identifier, or `None` for system local time.
    pub fn zone_id(self) -> Option<&'static str> {
        match self {
            TimezoneKey::Local => None,
            TimezoneKey::Utc => Some("UTC"),
            TimezoneKey::NewYork => Some("America/New_York"),
            TimezoneKey::LosAngeles => Some("America/Los_Angeles"),
            TimezoneKey::Paris => Some("Europe/Paris"),
            TimezoneKey::Tokyo => Some("Asia/Tokyo"),
        }
    }

    /// Look up a key by its exact display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.label() == label)
    }

    /// Resolve to a concrete zone. `None` means "use local time", either because this is the
    /// local entry or because the identifier could not be resolved.
    pub fn resolve(self) -> Option<Tz> {
        let id = self.zone_id()?;
        match resolve_zone_id(id) {
            Some(tz) => Some(tz),
            None => {
                tracing::warn!(zone = id, label = self.label(), "unresolvable timezone, using local time");
                None
            }
        }
    }
}

impl fmt::Display for TimezoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimezoneKey {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s.trim()).ok_or_else(|| ClockError::UnknownTimezone(s.to_string()))
    }
}

/// Parse an IANA identifier, returning `None` instead of an error.
pub fn resolve_zone_id(id: &str) -> Option<Tz> {
    id.parse::<Tz>().ok()
}

/// Labels of every registry entry in display order.
pub fn labels() -> Vec<&'static str> {
    TimezoneKey::ALL.iter().map(|key| key.label()).collect()
}

/// Check every registry entry resolves, logging the ones that do not.
///
/// Returns the keys that will fall back to local time. Run once at engine construction.
pub fn validate() -> Vec<TimezoneKey> {
    let unresolved: Vec<TimezoneKey> = TimezoneKey::ALL
        .into_iter()
        .filter(|key| key.zone_id().is_some_and(|id| resolve_zone_id(id).is_none()))
        .collect();
    for key in &unresolved {
        tracing::warn!(label = key.label(), zone = ?key.zone_id(), "timezone registry entry unresolvable");
    }
    unresolved
}
