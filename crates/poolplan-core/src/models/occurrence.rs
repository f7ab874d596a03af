//! Derived visit occurrences.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// One scheduled visit produced by expanding a plan. Never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub date: Date,
    /// Resolved window; `None` when neither an override nor the plan
    /// supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,
}

impl Occurrence {
    pub fn new(date: Date, window: Option<TimeWindow>) -> Self {
        Self { date, window }
    }
}
