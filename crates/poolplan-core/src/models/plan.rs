//! Service plan model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{BillingTerms, DayOfMonth, DayOfWeek, Frequency, FrequencyFamily, TimeWindow};

/// A recurring service agreement for one pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Identifier of the serviced pool
    pub pool_id: String,

    pub frequency: Frequency,

    /// Day-of-week anchor for week-based frequencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dow: Option<DayOfWeek>,

    /// Second day-of-week anchor, used only by `twice_week`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_dow: Option<DayOfWeek>,

    /// Day-of-month anchor for month-based frequencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom: Option<DayOfMonth>,

    /// Second day-of-month anchor, used only by `twice_month`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_dom: Option<DayOfMonth>,

    /// Default visit window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeWindow>,

    /// First day the plan is in effect (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<Date>,

    /// Last day the plan is in effect (inclusive); open-ended when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<Date>,

    /// Fortnight parity for `biweekly` plans: a date on `dow` fixed when the
    /// plan was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_anchor: Option<Date>,

    #[serde(flatten)]
    pub billing: BillingTerms,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl ServicePlan {
    /// Intersects a requested range with the plan's own bounds.
    ///
    /// Returns `None` when the intersection is empty.
    pub fn effective_range(&self, range_start: Date, range_end: Date) -> Option<(Date, Date)> {
        let lower = match self.starts_on {
            Some(starts_on) => starts_on.max(range_start),
            None => range_start,
        };
        let upper = match self.ends_on {
            Some(ends_on) => ends_on.min(range_end),
            None => range_end,
        };
        (lower <= upper).then_some((lower, upper))
    }

    /// Short description of when visits happen, e.g. `Twice a week (mon, thu)`.
    pub fn cadence(&self) -> String {
        let anchors: Vec<String> = match self.frequency.family() {
            FrequencyFamily::Week => [self.dow, self.second_dow]
                .into_iter()
                .flatten()
                .map(|d| d.to_string())
                .collect(),
            FrequencyFamily::Month => [self.dom, self.second_dom]
                .into_iter()
                .flatten()
                .map(|d| d.to_string())
                .collect(),
        };
        if anchors.is_empty() {
            self.frequency.label().to_string()
        } else {
            format!("{} ({})", self.frequency.label(), anchors.join(", "))
        }
    }
}
