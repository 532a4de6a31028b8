//! Parsing raw text fields from the UI into alarm and timer values.
//!
//! Fields are trimmed, must be ASCII digits only, and are range-checked in field order. The
//! error names the field so the UI can reset it to `"00"` and re-prompt. The engine repeats
//! the range checks on its own.

use std::fmt;

/// A text field of the alarm or timer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    AlarmHour,
    AlarmMinute,
    TimerHours,
    TimerMinutes,
    TimerSeconds,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputField::AlarmHour => "hour",
            InputField::AlarmMinute => "minute",
            InputField::TimerHours => "hours",
            InputField::TimerMinutes => "minutes",
            InputField::TimerSeconds => "seconds",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Empty, signed, or containing anything besides `0-9`.
    #[error("{field} must contain digits only (got {raw:?})")]
    NotDigits { field: InputField, raw: String },
    #[error("{field} must be between {min:02} and {max:02} (got {value})")]
    OutOfRange { field: InputField, min: u32, max: u32, value: u64 },
}

impl InputError {
    /// The field the UI should reset.
    pub fn field(&self) -> InputField {
        match self {
            InputError::NotDigits { field, .. } | InputError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Parse alarm `hour` (00-23) and `minute` (00-59).
pub fn parse_alarm_input(hour_raw: &str, minute_raw: &str) -> Result<(u32, u32), InputError> {
    let hour = digits(InputField::AlarmHour, hour_raw)?;
    let minute = digits(InputField::AlarmMinute, minute_raw)?;
    Ok((
        in_range(InputField::AlarmHour, hour, 23)?,
        in_range(InputField::AlarmMinute, minute, 59)?,
    ))
}

/// Parse timer `hours` (00-99), `minutes` (00-59) and `seconds` (00-59).
pub fn parse_timer_input(
    hours_raw: &str,
    minutes_raw: &str,
    seconds_raw: &str,
) -> Result<(u32, u32, u32), InputError> {
    let hours = digits(InputField::TimerHours, hours_raw)?;
    let minutes = digits(InputField::TimerMinutes, minutes_raw)?;
    let seconds = digits(InputField::TimerSeconds, seconds_raw)?;
    Ok((
        in_range(InputField::TimerHours, hours, 99)?,
        in_range(InputField::TimerMinutes, minutes, 59)?,
        in_range(InputField::TimerSeconds, seconds, 59)?,
    ))
}

fn digits(field: InputField, raw: &str) -> Result<u64, InputError> {
    let trimmed = raw.trim();
    let not_digits = || InputError::NotDigits { field, raw: raw.to_string() };
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_digits());
    }
    // Digit-only strings too long for u64 are certainly out of range.
    Ok(trimmed.parse::<u64>().unwrap_or(u64::MAX))
}

fn in_range(field: InputField, value: u64, max: u32) -> Result<u32, InputError> {
    match u32::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(InputError::OutOfRange { field, min: 0, max, value }),
    }
}
