//! Clock-time arithmetic for route timings and duty periods.
//!
//! All inputs are wall-clock times of day with no date attached. An end time
//! earlier than its start time is taken to fall on the following day; equal
//! times are a zero-length interval, never a full day.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::error::{Error, Result};

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u32 = 24 * SECONDS_PER_HOUR;

/// Placeholder shown for a clock time that has not been entered.
pub const UNSET_TIME: &str = "--:--";

/// Placeholder shown for a duration that has not been derived.
pub const UNSET_DURATION: &str = "0:00";

/// A wall-clock time of day with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: Self = Self(0);

    /// Build a clock time from hours and minutes.
    ///
    /// Returns `None` when either component is out of range.
    #[must_use]
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        Self::from_hms(hours, minutes, 0)
    }

    /// Build a clock time from hours, minutes and seconds.
    #[must_use]
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self(
            hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds,
        ))
    }

    /// Parse a form value, treating empty or malformed input as absent.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    /// Seconds elapsed since midnight.
    #[must_use]
    pub fn seconds_since_midnight(self) -> u32 {
        self.0
    }

    /// The hour component (0-23).
    #[must_use]
    pub fn hour(self) -> u32 {
        self.0 / SECONDS_PER_HOUR
    }

    /// The minute component (0-59).
    #[must_use]
    pub fn minute(self) -> u32 {
        (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    /// Accepts `HH:MM` and the `HH:MM:SS` form some time pickers emit.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(':');

        let mut component = |required: bool| -> Result<Option<u32>> {
            match parts.next() {
                Some(p) if !p.is_empty() && p.len() <= 2 && p.bytes().all(|b| b.is_ascii_digit()) => {
                    p.parse().map(Some).map_err(|_| Error::invalid_time(s))
                }
                None if !required => Ok(None),
                _ => Err(Error::invalid_time(s)),
            }
        };

        let hours = component(true)?.unwrap_or(0);
        let minutes = component(true)?.unwrap_or(0);
        let seconds = component(false)?.unwrap_or(0);
        if parts.next().is_some() {
            return Err(Error::invalid_time(s));
        }

        Self::from_hms(hours, minutes, seconds).ok_or_else(|| Error::invalid_time(s))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Elapsed time between two clock times, always less than one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed {
    seconds: u32,
}

impl Elapsed {
    /// Time from `start` to `end`, wrapping past midnight when `end < start`.
    #[must_use]
    pub fn between(start: ClockTime, end: ClockTime) -> Self {
        let seconds = if end.0 >= start.0 {
            end.0 - start.0
        } else {
            end.0 + SECONDS_PER_DAY - start.0
        };
        Self { seconds }
    }

    /// Whole hours, floored.
    #[must_use]
    pub fn whole_hours(self) -> u32 {
        self.seconds / SECONDS_PER_HOUR
    }

    /// Whole minutes past the last whole hour, floored.
    #[must_use]
    pub fn minutes_part(self) -> u32 {
        (self.seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }

    /// Total whole minutes, floored.
    #[must_use]
    pub fn total_minutes(self) -> u32 {
        self.seconds / SECONDS_PER_MINUTE
    }

    /// The elapsed time as fractional hours.
    #[must_use]
    pub fn as_hours(self) -> f64 {
        f64::from(self.seconds) / f64::from(SECONDS_PER_HOUR)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.whole_hours(), self.minutes_part())
    }
}

impl Sub for ClockTime {
    type Output = Elapsed;

    fn sub(self, rhs: ClockTime) -> Self::Output {
        Elapsed::between(rhs, self)
    }
}

/// Elapsed time between two `HH:MM` form values, formatted as `HH:MM`.
///
/// Returns `None` when either value is empty or not a valid time of day;
/// callers leave the derived field untouched in that case.
///
/// ```
/// use flightlog::compute_duration;
///
/// assert_eq!(compute_duration("10:00", "11:30").as_deref(), Some("01:30"));
/// assert_eq!(compute_duration("23:00", "01:00").as_deref(), Some("02:00"));
/// assert_eq!(compute_duration("", "01:00"), None);
/// ```
#[must_use]
pub fn compute_duration(start: &str, end: &str) -> Option<String> {
    let start = ClockTime::parse_lenient(start)?;
    let end = ClockTime::parse_lenient(end)?;
    Some((end - start).to_string())
}

/// Duty period length in decimal hours, rounded to two places.
///
/// Same wrap rules and skip rules as [`compute_duration`].
#[must_use]
pub fn compute_duty_hours(start: &str, end: &str) -> Option<f64> {
    let start = ClockTime::parse_lenient(start)?;
    let end = ClockTime::parse_lenient(end)?;
    Some(round_to((end - start).as_hours(), 2))
}

/// Convert a derived `HH:MM` duration string to whole minutes.
///
/// Empty or unparsable values count as zero. Hours are not capped at 23 so
/// hand-edited stored values still sum sensibly.
#[must_use]
pub fn duration_minutes(value: &str) -> u32 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    let mut parts = value.splitn(2, ':');
    let hours = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minutes = match parts.next() {
        Some(m) => m.trim().parse::<u32>().ok(),
        None => Some(0),
    };
    match (hours, minutes) {
        (Some(h), Some(m)) => h.saturating_mul(60).saturating_add(m),
        _ => 0,
    }
}

/// Round `value` half away from zero to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Render a clock-time field, using [`UNSET_TIME`] when blank.
#[must_use]
pub fn display_time(value: &str) -> &str {
    if value.is_empty() {
        UNSET_TIME
    } else {
        value
    }
}

/// Render a derived duration field, using [`UNSET_DURATION`] when blank.
#[must_use]
pub fn display_duration(value: &str) -> &str {
    if value.is_empty() {
        UNSET_DURATION
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_compute_duration_same_day() {
        assert_eq!(compute_duration("10:00", "11:30").as_deref(), Some("01:30"));
    }

    #[test]
    fn test_compute_duration_wraps_midnight() {
        assert_eq!(compute_duration("23:00", "01:00").as_deref(), Some("02:00"));
        assert_eq!(compute_duration("22:45", "06:10").as_deref(), Some("07:25"));
    }

    #[test]
    fn test_compute_duration_equal_times_is_zero() {
        assert_eq!(compute_duration("10:00", "10:00").as_deref(), Some("00:00"));
        assert_eq!(compute_duration("00:00", "00:00").as_deref(), Some("00:00"));
    }

    #[test]
    fn test_compute_duration_skips_empty_or_invalid() {
        assert_eq!(compute_duration("", "10:00"), None);
        assert_eq!(compute_duration("10:00", ""), None);
        assert_eq!(compute_duration("24:00", "10:00"), None);
        assert_eq!(compute_duration("ten", "10:00"), None);
    }

    #[test]
    fn test_compute_duration_floors_seconds() {
        assert_eq!(
            compute_duration("10:00:00", "10:59:59").as_deref(),
            Some("00:59")
        );
    }

    #[test]
    fn test_compute_duration_longest_interval() {
        assert_eq!(compute_duration("00:01", "00:00").as_deref(), Some("23:59"));
    }

    #[test]
    fn test_compute_duty_hours() {
        assert_eq!(compute_duty_hours("06:00", "14:20"), Some(8.33));
        assert_eq!(compute_duty_hours("20:00", "02:30"), Some(6.5));
        assert_eq!(compute_duty_hours("08:00", "08:00"), Some(0.0));
        assert_eq!(compute_duty_hours("", "08:00"), None);
    }

    #[test]
    fn test_clock_time_parse() {
        assert_eq!(t("07:05"), ClockTime::from_hm(7, 5).unwrap());
        assert_eq!(t("7:05"), ClockTime::from_hm(7, 5).unwrap());
        assert_eq!(t(" 23:59 "), ClockTime::from_hm(23, 59).unwrap());
        assert_eq!(t("12:30:15").seconds_since_midnight(), 12 * 3600 + 30 * 60 + 15);
    }

    #[test]
    fn test_clock_time_parse_rejects() {
        for bad in ["", "12", "12:", ":30", "24:00", "12:60", "1:2:3:4", "ab:cd", "123:00"] {
            let err = bad.parse::<ClockTime>().unwrap_err();
            assert!(matches!(err, Error::InvalidTime { .. }), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_clock_time_display() {
        assert_eq!(ClockTime::MIDNIGHT.to_string(), "00:00");
        assert_eq!(t("9:07").to_string(), "09:07");
    }

    #[test]
    fn test_clock_time_sub_operator() {
        assert_eq!((t("01:00") - t("23:00")).total_minutes(), 120);
        assert_eq!((t("11:30") - t("10:00")).as_hours(), 1.5);
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(duration_minutes("01:30"), 90);
        assert_eq!(duration_minutes("1:05"), 65);
        assert_eq!(duration_minutes("26:00"), 26 * 60);
        assert_eq!(duration_minutes("3"), 180);
        assert_eq!(duration_minutes(""), 0);
        assert_eq!(duration_minutes("garbage"), 0);
        assert_eq!(duration_minutes("1:xx"), 0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_5, 2), 1.23);
        assert_eq!(round_to(1.235_1, 2), 1.24);
        assert_eq!(round_to(12.25, 1), 12.3);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn test_display_fallbacks() {
        assert_eq!(display_time(""), "--:--");
        assert_eq!(display_time("08:15"), "08:15");
        assert_eq!(display_duration(""), "0:00");
        assert_eq!(display_duration("01:10"), "01:10");
    }
}
