//! Per-date window overrides and pause periods.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// Replaces the plan's default window on one specific date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WindowOverride {
    pub date: Date,
    pub window: TimeWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Suppresses all visits from `starts_on` through `until`, or indefinitely
/// when `until` is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PausePeriod {
    pub starts_on: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PausePeriod {
    /// Whether `date` is inside the pause interval (both ends inclusive).
    pub fn covers(&self, date: Date) -> bool {
        date >= self.starts_on && self.until.map_or(true, |until| date <= until)
    }
}
