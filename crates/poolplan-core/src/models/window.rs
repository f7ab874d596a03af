//! Time-of-day visit windows.

use std::{fmt, str::FromStr};

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// A time-of-day interval during which a visit is expected, serialized as
/// `{"start": "HH:MM", "end": "HH:MM"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct TimeWindow {
    start: Time,
    end: Time,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWindow {
    start: String,
    end: String,
}

impl TimeWindow {
    /// Creates a window, requiring `start` to be strictly before `end`.
    pub fn new(start: Time, end: Time) -> Result<Self, PlanError> {
        if start >= end {
            return Err(PlanError::InvalidWindow {
                reason: format!(
                    "start {} must be before end {}",
                    hhmm(start),
                    hhmm(end)
                ),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, PlanError> {
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }
}

/// Parses a strict 24-hour `HH:MM` string.
pub fn parse_hhmm(value: &str) -> Result<Time, PlanError> {
    let invalid = || PlanError::InvalidWindow {
        reason: format!("'{value}' is not a HH:MM time"),
    };

    let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
    let digits = hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit());
    if hour.len() != 2 || minute.len() != 2 || !digits {
        return Err(invalid());
    }
    let hour: i8 = hour.parse().map_err(|_| invalid())?;
    let minute: i8 = minute.parse().map_err(|_| invalid())?;
    Time::new(hour, minute, 0, 0).map_err(|_| invalid())
}

fn hhmm(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = PlanError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::parse(&raw.start, &raw.end)
    }
}

impl From<TimeWindow> for RawWindow {
    fn from(window: TimeWindow) -> Self {
        RawWindow {
            start: hhmm(window.start),
            end: hhmm(window.end),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = PlanError;

    /// Parses the compact `HH:MM-HH:MM` form used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| PlanError::InvalidWindow {
            reason: format!("'{s}' is not a HH:MM-HH:MM window"),
        })?;
        Self::parse(start, end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", hhmm(self.start), hhmm(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_window() {
        let window = TimeWindow::parse("09:00", "11:30").unwrap();
        assert_eq!(window.to_string(), "09:00-11:30");
        assert_eq!(window.start().hour(), 9);
        assert_eq!(window.end().minute(), 30);
    }

    #[test]
    fn test_reject_inverted_window() {
        let err = TimeWindow::parse("12:00", "08:00").unwrap_err();
        assert!(matches!(err, PlanError::InvalidWindow { .. }));
        assert!(TimeWindow::parse("08:00", "08:00").is_err());
    }

    #[test]
    fn test_reject_malformed_times() {
        for bad in ["9:00", "24:00", "12:60", "noon", "12:00:00", ""] {
            assert!(parse_hhmm(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_compact_form() {
        let window: TimeWindow = "07:15-08:45".parse().unwrap();
        assert_eq!(window, TimeWindow::parse("07:15", "08:45").unwrap());
        assert!("07:15".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_serde_uses_hhmm_strings() {
        let window = TimeWindow::parse("09:00", "10:00").unwrap();
        let json = serde_json::to_string(&window).unwrap();
        assert_eq!(json, r#"{"start":"09:00","end":"10:00"}"#);

        let back: TimeWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, window);

        let inverted = serde_json::from_str::<TimeWindow>(r#"{"start":"10:00","end":"09:00"}"#);
        assert!(inverted.is_err());
    }
}
