// Calendar days and inclusive date ranges
// Occupancy is tracked per calendar day, so every timestamp that enters the
// crate is truncated to its UTC date before it is compared with anything.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Range starts after it ends: {from} > {to}")]
    InvertedRange { from: CalendarDay, to: CalendarDay },
}

// A date with the time-of-day stripped off
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    // Midnight UTC at the start of this day
    pub fn start_of_day(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }

    // The API's timestamp form, e.g. 2025-06-10T00:00:00.000Z
    pub fn to_iso(&self) -> String {
        self.start_of_day().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    // Whole days from `self` to `other`, negative when `other` is earlier
    pub fn days_until(&self, other: CalendarDay) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateTime<Utc>> for CalendarDay {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp.date_naive())
    }
}

impl FromStr for CalendarDay {
    type Err = CalendarError;

    // Accepts a bare date or any RFC 3339 timestamp; timestamps are moved to
    // UTC before truncation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|ts| Self(ts.with_timezone(&Utc).date_naive()))
            .map_err(|_| CalendarError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// Expand an inclusive [start, end] pair into every day it covers
pub fn expand_range(
    start: CalendarDay,
    end: CalendarDay,
) -> Result<Vec<CalendarDay>, CalendarError> {
    if start > end {
        return Err(CalendarError::InvertedRange {
            from: start,
            to: end,
        });
    }
    Ok(start
        .0
        .iter_days()
        .take_while(|day| *day <= end.0)
        .map(CalendarDay)
        .collect())
}

// Inclusive range of calendar days. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: CalendarDay,
    to: CalendarDay,
}

impl DateRange {
    pub fn new(from: CalendarDay, to: CalendarDay) -> Result<Self, CalendarError> {
        if from > to {
            return Err(CalendarError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    // Swaps an inverted pair instead of failing
    pub fn normalized(a: CalendarDay, b: CalendarDay) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    pub fn single(day: CalendarDay) -> Self {
        Self { from: day, to: day }
    }

    pub fn from(&self) -> CalendarDay {
        self.from
    }

    pub fn to(&self) -> CalendarDay {
        self.to
    }

    pub fn days(&self) -> Vec<CalendarDay> {
        // from <= to is an invariant of the type
        expand_range(self.from, self.to).unwrap_or_default()
    }

    // Number of days covered, counting both ends
    pub fn len_days(&self) -> usize {
        self.from.days_until(self.to) as usize + 1
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.from <= day && day <= self.to
    }

    // The nights of a stay: every covered day except the check-out day
    pub fn nights(&self) -> Vec<CalendarDay> {
        let mut days = self.days();
        days.pop();
        days
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}
