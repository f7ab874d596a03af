//! Day-of-week and day-of-month anchors.

use std::{fmt, str::FromStr};

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Day-of-week anchor for week-based frequencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "mon",
            DayOfWeek::Tue => "tue",
            DayOfWeek::Wed => "wed",
            DayOfWeek::Thu => "thu",
            DayOfWeek::Fri => "fri",
            DayOfWeek::Sat => "sat",
            DayOfWeek::Sun => "sun",
        }
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            DayOfWeek::Mon => Weekday::Monday,
            DayOfWeek::Tue => Weekday::Tuesday,
            DayOfWeek::Wed => Weekday::Wednesday,
            DayOfWeek::Thu => Weekday::Thursday,
            DayOfWeek::Fri => Weekday::Friday,
            DayOfWeek::Sat => Weekday::Saturday,
            DayOfWeek::Sun => Weekday::Sunday,
        }
    }

    /// Whether `date` falls on this day of the week.
    pub fn matches(self, date: Date) -> bool {
        date.weekday() == self.to_weekday()
    }

    /// Number of days from `date` forward to the next day matching this
    /// anchor (zero when `date` already matches).
    pub fn days_from(self, date: Date) -> i64 {
        let target = i64::from(self.to_weekday().to_monday_zero_offset());
        let current = i64::from(date.weekday().to_monday_zero_offset());
        (target - current).rem_euclid(7)
    }
}

impl FromStr for DayOfWeek {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(DayOfWeek::Mon),
            "tue" | "tuesday" => Ok(DayOfWeek::Tue),
            "wed" | "wednesday" => Ok(DayOfWeek::Wed),
            "thu" | "thursday" => Ok(DayOfWeek::Thu),
            "fri" | "friday" => Ok(DayOfWeek::Fri),
            "sat" | "saturday" => Ok(DayOfWeek::Sat),
            "sun" | "sunday" => Ok(DayOfWeek::Sun),
            _ => Err(PlanError::invalid_anchor(
                "dow",
                format!("'{s}' is not a day of the week (mon..sun)"),
            )),
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day-of-month anchor: `1..=28`, or `-1` for the last day of the month.
///
/// Days 29 to 31 are rejected so that every anchor exists in every month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i32", into = "i32")]
pub struct DayOfMonth(i8);

impl DayOfMonth {
    pub const LAST: DayOfMonth = DayOfMonth(-1);

    pub fn new(value: i32) -> Result<Self, PlanError> {
        match value {
            -1 => Ok(Self::LAST),
            1..=28 => Ok(DayOfMonth(value as i8)),
            _ => Err(PlanError::invalid_anchor(
                "dom",
                format!("{value} is outside 1..=28 (or -1 for the last day)"),
            )),
        }
    }

    pub fn value(self) -> i32 {
        i32::from(self.0)
    }

    pub fn is_last(self) -> bool {
        self.0 == -1
    }

    /// The concrete date this anchor selects in the month containing
    /// `in_month`.
    pub fn resolve(self, in_month: Date) -> Date {
        if self.is_last() {
            in_month.last_of_month()
        } else {
            // 1..=28 exists in every month, so only the day changes.
            in_month
                .first_of_month()
                .with()
                .day(self.0)
                .build()
                .unwrap_or_else(|_| in_month.last_of_month())
        }
    }
}

impl TryFrom<i32> for DayOfMonth {
    type Error = PlanError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DayOfMonth> for i32 {
    fn from(value: DayOfMonth) -> Self {
        value.value()
    }
}

impl fmt::Display for DayOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_last() {
            write!(f, "last day")
        } else {
            write!(f, "day {}", self.0)
        }
    }
}
