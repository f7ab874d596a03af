//! Plan frequency descriptors.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// How often a service plan produces visits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    OnceWeek,
    TwiceWeek,
    OnceMonth,
    TwiceMonth,
}

/// The calendar unit a frequency steps through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyFamily {
    /// Anchored on a day of the week (`dow`)
    Week,
    /// Anchored on a day of the month (`dom`)
    Month,
}

impl Frequency {
    pub const ALL: [Frequency; 7] = [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::OnceWeek,
        Frequency::TwiceWeek,
        Frequency::OnceMonth,
        Frequency::TwiceMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::OnceWeek => "once_week",
            Frequency::TwiceWeek => "twice_week",
            Frequency::OnceMonth => "once_month",
            Frequency::TwiceMonth => "twice_month",
        }
    }

    pub fn family(&self) -> FrequencyFamily {
        match self {
            Frequency::Weekly | Frequency::Biweekly | Frequency::OnceWeek | Frequency::TwiceWeek => {
                FrequencyFamily::Week
            }
            Frequency::Monthly | Frequency::OnceMonth | Frequency::TwiceMonth => {
                FrequencyFamily::Month
            }
        }
    }

    /// Whether the frequency needs a second anchor (`second_dow` or
    /// `second_dom`).
    pub fn needs_second_anchor(&self) -> bool {
        matches!(self, Frequency::TwiceWeek | Frequency::TwiceMonth)
    }

    /// Human readable label used in plan listings.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Weekly | Frequency::OnceWeek => "Once a week",
            Frequency::Biweekly => "Every two weeks",
            Frequency::TwiceWeek => "Twice a week",
            Frequency::Monthly | Frequency::OnceMonth => "Once a month",
            Frequency::TwiceMonth => "Twice a month",
        }
    }
}

impl FromStr for Frequency {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| PlanError::InvalidFrequency {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Frequency {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
