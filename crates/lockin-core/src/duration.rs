//! Block durations and the wall-clock time the unblock job runs at.

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use std::fmt;

use crate::error::LockinError;

/// Unit of a block duration, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    /// Parse the one-letter tag (`m`, `h`, `d`, `w`).
    pub fn from_tag(tag: &str) -> Result<Self, LockinError> {
        match tag {
            "m" => Ok(Self::Minute),
            "h" => Ok(Self::Hour),
            "d" => Ok(Self::Day),
            "w" => Ok(Self::Week),
            other => Err(LockinError::InvalidUnit(other.to_string())),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Minute => "m",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "w",
        }
    }

    /// Fixed length of one unit, in minutes.
    pub fn minutes(self) -> i64 {
        match self {
            Self::Minute => 1,
            Self::Hour => 60,
            Self::Day => 24 * 60,
            Self::Week => 7 * 24 * 60,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// How long a site stays blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDuration {
    pub count: u32,
    pub unit: TimeUnit,
}

impl BlockDuration {
    pub fn new(count: u32, unit: TimeUnit) -> Self {
        Self { count, unit }
    }

    /// Parse a count plus unit tag; fails with `InvalidUnit` on an unknown tag.
    pub fn from_parts(count: u32, tag: &str) -> Result<Self, LockinError> {
        Ok(Self::new(count, TimeUnit::from_tag(tag)?))
    }

    /// `count` scaled by the unit's conversion factor. Cannot overflow for a `u32` count.
    pub fn to_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.count) * self.unit.minutes())
    }
}

impl fmt::Display for BlockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.count, self.unit.name(), plural)
    }
}

/// Time the unblock job should run: `now` plus the whole minutes of `delta`,
/// with seconds dropped so it lines up with `at`'s minute resolution.
pub fn unblock_time(now: NaiveDateTime, delta: TimeDelta) -> Result<NaiveDateTime, LockinError> {
    let minutes = delta.num_minutes();
    let out_of_range = || LockinError::TimeOutOfRange { minutes };
    let step = TimeDelta::try_minutes(minutes).ok_or_else(out_of_range)?;
    let run_at = now.checked_add_signed(step).ok_or_else(out_of_range)?;
    run_at
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(out_of_range)
}

/// Render a run time the way `at` accepts it: `HH:MM YYYY-MM-DD`.
pub fn at_timespec(run_at: NaiveDateTime) -> String {
    run_at.format("%H:%M %Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn units_scale_by_fixed_factor() {
        assert_eq!(BlockDuration::new(5, TimeUnit::Minute).to_delta(), TimeDelta::minutes(5));
        assert_eq!(BlockDuration::new(3, TimeUnit::Hour).to_delta(), TimeDelta::hours(3));
        assert_eq!(BlockDuration::new(4, TimeUnit::Day).to_delta(), TimeDelta::days(4));
        assert_eq!(BlockDuration::new(2, TimeUnit::Week).to_delta(), TimeDelta::weeks(2));
    }

    #[test]
    fn two_weeks_is_fourteen_days_is_336_hours() {
        let weeks = BlockDuration::new(2, TimeUnit::Week).to_delta();
        let days = BlockDuration::new(14, TimeUnit::Day).to_delta();
        let hours = BlockDuration::new(336, TimeUnit::Hour).to_delta();
        assert_eq!(weeks, days);
        assert_eq!(days, hours);
    }

    #[test]
    fn max_count_does_not_overflow() {
        let d = BlockDuration::new(u32::MAX, TimeUnit::Week).to_delta();
        assert_eq!(d.num_weeks(), i64::from(u32::MAX));
    }

    #[test]
    fn unknown_tag_is_invalid_unit() {
        let err = BlockDuration::from_parts(1, "y").unwrap_err();
        assert!(matches!(err, LockinError::InvalidUnit(ref t) if t == "y"));
        assert_eq!(TimeUnit::from_tag("w").unwrap(), TimeUnit::Week);
    }

    #[test]
    fn tags_roundtrip() {
        for unit in [TimeUnit::Minute, TimeUnit::Hour, TimeUnit::Day, TimeUnit::Week] {
            assert_eq!(TimeUnit::from_tag(unit.tag()).unwrap(), unit);
        }
    }

    #[test]
    fn display_pluralizes() {
        assert_eq!(BlockDuration::new(1, TimeUnit::Hour).to_string(), "1 hour");
        assert_eq!(BlockDuration::new(3, TimeUnit::Day).to_string(), "3 days");
    }

    #[test]
    fn unblock_time_drops_seconds() {
        let now = at(2026, 3, 1, 9, 15, 42);
        let run_at = unblock_time(now, TimeDelta::minutes(30)).unwrap();
        assert_eq!(run_at, at(2026, 3, 1, 9, 45, 0));
    }

    #[test]
    fn unblock_time_rounds_partial_minutes_down() {
        let now = at(2026, 3, 1, 9, 15, 0);
        let run_at = unblock_time(now, TimeDelta::seconds(90)).unwrap();
        assert_eq!(run_at, at(2026, 3, 1, 9, 16, 0));
    }

    #[test]
    fn unblock_time_crosses_dates() {
        let now = at(2026, 12, 31, 23, 50, 5);
        let run_at = unblock_time(now, BlockDuration::new(1, TimeUnit::Week).to_delta()).unwrap();
        assert_eq!(run_at, at(2027, 1, 7, 23, 50, 0));
    }

    #[test]
    fn unblock_time_out_of_range() {
        let now = at(2026, 1, 1, 0, 0, 0);
        let delta = BlockDuration::new(u32::MAX, TimeUnit::Week).to_delta();
        let err = unblock_time(now, delta).unwrap_err();
        assert!(matches!(err, LockinError::TimeOutOfRange { .. }));
    }

    #[test]
    fn at_timespec_format() {
        assert_eq!(at_timespec(at(2026, 3, 1, 7, 5, 0)), "07:05 2026-03-01");
    }
}
