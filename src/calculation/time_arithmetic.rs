//! Wall-clock time arithmetic.
//!
//! Shift times are plain hour:minute values with no date or timezone. This
//! module turns a start time, end time and break into billable time.
//!
//! ## Overnight policy
//!
//! An end time earlier than the start time is an overnight shift and has
//! 24 hours added. An end time equal to the start time is a zero-length
//! shift, not a 24 hour one.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Returns the number of minutes since midnight for a wall-clock time.
///
/// Seconds are ignored.
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Returns the raw span between start and end in minutes.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::span_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert_eq!(span_minutes(t(9, 0), t(17, 30)), 510);
/// // Overnight: 22:00 to 06:00 is 8 hours
/// assert_eq!(span_minutes(t(22, 0), t(6, 0)), 480);
/// // Equal times are a zero-length shift
/// assert_eq!(span_minutes(t(9, 0), t(9, 0)), 0);
/// ```
pub fn span_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let start = minute_of_day(start);
    let end = minute_of_day(end);

    if end < start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    }
}

/// Returns the worked minutes after subtracting the break.
///
/// Never negative: a break at least as long as the span yields zero.
pub fn net_minutes(start: NaiveTime, end: NaiveTime, break_minutes: u32) -> i64 {
    (span_minutes(start, end) - i64::from(break_minutes)).max(0)
}

/// Converts a minute count to hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Returns net billable hours for a start time, end time and break.
///
/// # Examples
///
/// ```
/// use quote_engine::calculation::net_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// // 09:00 to 17:30 with a 30 minute break is 8 hours
/// assert_eq!(net_hours(t(9, 0), t(17, 30), 30), Decimal::new(8, 0));
/// // A break longer than the shift floors at zero
/// assert_eq!(net_hours(t(9, 0), t(9, 20), 45), Decimal::ZERO);
/// ```
pub fn net_hours(start: NaiveTime, end: NaiveTime, break_minutes: u32) -> Decimal {
    minutes_to_hours(net_minutes(start, end, break_minutes))
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
///
/// Returns a validation error if the text is not a valid time of day.
pub fn parse_wall_clock(text: &str) -> EngineResult<NaiveTime> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| {
            EngineError::validation("time", format!("'{}' is not a valid HH:MM time", text))
        })
}

/// Serde adapter for wall-clock times written as `HH:MM`.
///
/// Use with `#[serde(with = "wall_clock")]`.
pub mod wall_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Deserializes a time from `HH:MM` or `HH:MM:SS`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_wall_clock(&text).map_err(serde::de::Error::custom)
    }
}
