//! Parameter structures for poolplan operations
//!
//! These are the request shapes interfaces hand to the core: plain strings
//! and numbers exactly as a user or client sent them, free of any CLI
//! framework derives. Each structure knows how to validate itself into the
//! typed values of [`crate::models`], so every interface applies identical
//! rules.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │  Typed Models   │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  (validated)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every structure rejects unknown keys when deserialized, so a client that
//! sends a misspelled or unsupported field gets an error instead of silent
//! data loss.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanError, Result},
    models::{
        BillingTerms, BillingType, DayOfMonth, DayOfWeek, Frequency, FrequencyFamily,
        PausePeriod, ServicePlan, TimeWindow, WindowOverride,
    },
    recurrence,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeletePlan {
    pub id: u64,
    /// Must be true for the deletion to proceed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListPlans {
    /// Only list plans for this pool
    #[serde(default)]
    pub pool_id: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Parameters for creating a service plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CreatePlan {
    /// Identifier of the serviced pool (required)
    pub pool_id: String,
    /// One of weekly, biweekly, monthly, once_week, twice_week, once_month,
    /// twice_month
    pub frequency: String,
    /// Day-of-week anchor (mon..sun) for week-based frequencies
    #[serde(default)]
    pub dow: Option<String>,
    /// Second day-of-week anchor for twice_week
    #[serde(default)]
    pub second_dow: Option<String>,
    /// Day-of-month anchor (1..=28, or -1 for the last day)
    #[serde(default)]
    pub dom: Option<i32>,
    /// Second day-of-month anchor for twice_month
    #[serde(default)]
    pub second_dom: Option<i32>,
    /// Default window start, HH:MM
    #[serde(default)]
    pub window_start: Option<String>,
    /// Default window end, HH:MM
    #[serde(default)]
    pub window_end: Option<String>,
    /// First day of service, YYYY-MM-DD
    #[serde(default)]
    pub starts_on: Option<String>,
    /// Last day of service, YYYY-MM-DD
    #[serde(default)]
    pub ends_on: Option<String>,
    /// Biweekly parity date, YYYY-MM-DD, falling on `dow`. Defaults to the
    /// first `dow` on or after `starts_on` (or today).
    #[serde(default)]
    pub cycle_anchor: Option<String>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub tax_pct: f64,
    #[serde(default)]
    pub discount_pct: f64,
    /// One of per_visit, monthly, quarterly, annually (default per_visit)
    #[serde(default)]
    pub billing_type: Option<String>,
}

impl Default for CreatePlan {
    fn default() -> Self {
        Self {
            pool_id: String::new(),
            frequency: String::new(),
            dow: None,
            second_dow: None,
            dom: None,
            second_dom: None,
            window_start: None,
            window_end: None,
            starts_on: None,
            ends_on: None,
            cycle_anchor: None,
            price_cents: 0,
            currency: default_currency(),
            tax_pct: 0.0,
            discount_pct: 0.0,
            billing_type: None,
        }
    }
}

/// A validated plan that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub pool_id: String,
    pub frequency: Frequency,
    pub dow: Option<DayOfWeek>,
    pub second_dow: Option<DayOfWeek>,
    pub dom: Option<DayOfMonth>,
    pub second_dom: Option<DayOfMonth>,
    pub window: Option<TimeWindow>,
    pub starts_on: Option<Date>,
    pub ends_on: Option<Date>,
    pub cycle_anchor: Option<Date>,
    pub billing: BillingTerms,
}

impl PlanDraft {
    /// Attaches storage identity to the draft.
    pub fn into_plan(self, id: u64, created_at: Timestamp) -> ServicePlan {
        ServicePlan {
            id,
            pool_id: self.pool_id,
            frequency: self.frequency,
            dow: self.dow,
            second_dow: self.second_dow,
            dom: self.dom,
            second_dom: self.second_dom,
            window: self.window,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            cycle_anchor: self.cycle_anchor,
            billing: self.billing,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Parses a `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|_| PlanError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value.map(|v| parse_date(field, v)).transpose()
}

fn parse_dow(field: &str, value: Option<&str>) -> Result<Option<DayOfWeek>> {
    value
        .map(|v| {
            v.parse::<DayOfWeek>().map_err(|_| {
                PlanError::invalid_anchor(field, format!("'{v}' is not a day of the week (mon..sun)"))
            })
        })
        .transpose()
}

fn parse_dom(field: &str, value: Option<i32>) -> Result<Option<DayOfMonth>> {
    value
        .map(|v| {
            DayOfMonth::new(v).map_err(|_| {
                PlanError::invalid_anchor(field, format!("{v} is outside 1..=28 (or -1 for the last day)"))
            })
        })
        .transpose()
}

/// Builds a window from optional start/end strings; both or neither.
pub fn parse_window(start: Option<&str>, end: Option<&str>) -> Result<Option<TimeWindow>> {
    match (start, end) {
        (Some(start), Some(end)) => TimeWindow::parse(start, end).map(Some),
        (None, None) => Ok(None),
        _ => Err(PlanError::InvalidWindow {
            reason: "window start and end must be given together".to_string(),
        }),
    }
}

impl CreatePlan {
    /// Validates the request into a [`PlanDraft`].
    ///
    /// `today` fixes the biweekly cycle anchor when neither an anchor nor a
    /// start date is given. Only biweekly plans carry a cycle anchor.
    /// Anchors belonging to the other frequency family are discarded, and a
    /// second anchor is only kept for the `twice_*` frequencies.
    ///
    /// # Errors
    ///
    /// `InvalidFrequency`, `MissingAnchor`, `InvalidAnchor`, `InvalidWindow`,
    /// `InvalidDate` or `InvalidInput` describing the first problem found.
    pub fn validate(&self, today: Date) -> Result<PlanDraft> {
        let pool_id = self.pool_id.trim();
        if pool_id.is_empty() {
            return Err(PlanError::invalid_input("pool_id").with_reason("must not be empty"));
        }

        let frequency: Frequency = self.frequency.parse()?;
        let window = parse_window(self.window_start.as_deref(), self.window_end.as_deref())?;
        let starts_on = parse_optional_date("starts_on", self.starts_on.as_deref())?;
        let ends_on = parse_optional_date("ends_on", self.ends_on.as_deref())?;
        if let (Some(starts_on), Some(ends_on)) = (starts_on, ends_on) {
            if ends_on < starts_on {
                return Err(PlanError::invalid_input("ends_on")
                    .with_reason(format!("{ends_on} is before starts_on {starts_on}")));
            }
        }

        let billing_type = match self.billing_type.as_deref() {
            Some(value) => value.parse::<BillingType>()?,
            None => BillingType::default(),
        };
        let billing = BillingTerms {
            price_cents: self.price_cents,
            currency: self.currency.trim().to_string(),
            tax_pct: self.tax_pct,
            discount_pct: self.discount_pct,
            billing_type,
        };
        billing.validate()?;

        let (mut dow, mut second_dow, mut dom, mut second_dom) = (None, None, None, None);
        match frequency.family() {
            FrequencyFamily::Week => {
                dow = parse_dow("dow", self.dow.as_deref())?;
                if frequency.needs_second_anchor() {
                    second_dow = parse_dow("second_dow", self.second_dow.as_deref())?;
                }
            }
            FrequencyFamily::Month => {
                dom = parse_dom("dom", self.dom)?;
                if frequency.needs_second_anchor() {
                    second_dom = parse_dom("second_dom", self.second_dom)?;
                }
            }
        }

        let cycle_anchor = match (frequency, dow) {
            (Frequency::Biweekly, Some(dow)) => {
                match parse_optional_date("cycle_anchor", self.cycle_anchor.as_deref())? {
                    Some(anchor) => Some(anchor),
                    None => recurrence::first_on_or_after(dow, starts_on.unwrap_or(today)),
                }
            }
            _ => None,
        };

        let draft = PlanDraft {
            pool_id: pool_id.to_string(),
            frequency,
            dow,
            second_dow,
            dom,
            second_dom,
            window,
            starts_on,
            ends_on,
            cycle_anchor,
            billing,
        };

        // A draft that validates must always expand.
        recurrence::validate(&draft.clone().into_plan(0, Timestamp::UNIX_EPOCH))?;
        Ok(draft)
    }
}

impl From<&ServicePlan> for CreatePlan {
    fn from(plan: &ServicePlan) -> Self {
        CreatePlan {
            pool_id: plan.pool_id.clone(),
            frequency: plan.frequency.to_string(),
            dow: plan.dow.map(|d| d.to_string()),
            second_dow: plan.second_dow.map(|d| d.to_string()),
            dom: plan.dom.map(i32::from),
            second_dom: plan.second_dom.map(i32::from),
            window_start: plan.window.map(|w| w.to_string()[..5].to_string()),
            window_end: plan.window.map(|w| w.to_string()[6..].to_string()),
            starts_on: plan.starts_on.map(|d| d.to_string()),
            ends_on: plan.ends_on.map(|d| d.to_string()),
            cycle_anchor: plan.cycle_anchor.map(|d| d.to_string()),
            price_cents: plan.billing.price_cents,
            currency: plan.billing.currency.clone(),
            tax_pct: plan.billing.tax_pct,
            discount_pct: plan.billing.discount_pct,
            billing_type: Some(plan.billing.billing_type.to_string()),
        }
    }
}

/// Parameters for updating a service plan. Absent fields keep their current
/// value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePlan {
    pub id: u64,
    #[serde(default)]
    pub pool_id: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub dow: Option<String>,
    #[serde(default)]
    pub second_dow: Option<String>,
    #[serde(default)]
    pub dom: Option<i32>,
    #[serde(default)]
    pub second_dom: Option<i32>,
    #[serde(default)]
    pub window_start: Option<String>,
    #[serde(default)]
    pub window_end: Option<String>,
    /// Remove the default window
    #[serde(default)]
    pub clear_window: bool,
    #[serde(default)]
    pub starts_on: Option<String>,
    #[serde(default)]
    pub ends_on: Option<String>,
    /// Make the plan open-ended
    #[serde(default)]
    pub clear_ends_on: bool,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub tax_pct: Option<f64>,
    #[serde(default)]
    pub discount_pct: Option<f64>,
    #[serde(default)]
    pub billing_type: Option<String>,
}

impl UpdatePlan {
    /// Merges the update onto `current` and revalidates the result.
    ///
    /// The biweekly cycle anchor is kept as stored unless `dow` changes, in
    /// which case it moves to the first new `dow` on or after the old anchor.
    /// A plan switched to biweekly is anchored as on creation.
    ///
    /// Returns the updated plan and a description of each change made. When
    /// nothing changed the plan is returned untouched; otherwise `updated_at`
    /// is set to `now`.
    pub fn apply(
        &self,
        current: &ServicePlan,
        today: Date,
        now: Timestamp,
    ) -> Result<(ServicePlan, Vec<String>)> {
        if self.clear_window && (self.window_start.is_some() || self.window_end.is_some()) {
            return Err(PlanError::InvalidWindow {
                reason: "cannot set and clear the window in the same update".to_string(),
            });
        }
        if self.clear_ends_on && self.ends_on.is_some() {
            return Err(PlanError::invalid_input("ends_on")
                .with_reason("cannot set and clear ends_on in the same update"));
        }

        let mut merged = CreatePlan::from(current);
        if let Some(pool_id) = &self.pool_id {
            merged.pool_id = pool_id.clone();
        }
        if let Some(frequency) = &self.frequency {
            merged.frequency = frequency.clone();
        }
        if self.dow.is_some() {
            merged.dow = self.dow.clone();
        }
        if self.second_dow.is_some() {
            merged.second_dow = self.second_dow.clone();
        }
        if self.dom.is_some() {
            merged.dom = self.dom;
        }
        if self.second_dom.is_some() {
            merged.second_dom = self.second_dom;
        }
        if self.clear_window {
            merged.window_start = None;
            merged.window_end = None;
        } else if self.window_start.is_some() || self.window_end.is_some() {
            merged.window_start = self.window_start.clone();
            merged.window_end = self.window_end.clone();
        }
        if self.starts_on.is_some() {
            merged.starts_on = self.starts_on.clone();
        }
        if self.clear_ends_on {
            merged.ends_on = None;
        } else if self.ends_on.is_some() {
            merged.ends_on = self.ends_on.clone();
        }
        if let Some(price_cents) = self.price_cents {
            merged.price_cents = price_cents;
        }
        if let Some(currency) = &self.currency {
            merged.currency = currency.clone();
        }
        if let Some(tax_pct) = self.tax_pct {
            merged.tax_pct = tax_pct;
        }
        if let Some(discount_pct) = self.discount_pct {
            merged.discount_pct = discount_pct;
        }
        if self.billing_type.is_some() {
            merged.billing_type = self.billing_type.clone();
        }

        merged.cycle_anchor = None;
        let mut draft = merged.validate(today)?;
        if draft.frequency == Frequency::Biweekly {
            draft.cycle_anchor = match (draft.dow, current.cycle_anchor) {
                (Some(dow), Some(anchor)) if Some(dow) == current.dow => Some(anchor),
                (Some(dow), Some(anchor)) => recurrence::first_on_or_after(dow, anchor),
                (_, _) => draft.cycle_anchor,
            };
        }

        let mut updated = draft.into_plan(current.id, current.created_at);
        recurrence::validate(&updated)?;

        let changes = describe_changes(current, &updated);
        if changes.is_empty() {
            return Ok((current.clone(), changes));
        }
        updated.updated_at = now;
        Ok((updated, changes))
    }
}

fn describe_changes(before: &ServicePlan, after: &ServicePlan) -> Vec<String> {
    fn show<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| "none".to_string(), |v| v.to_string())
    }

    let mut changes = Vec::new();
    if before.pool_id != after.pool_id {
        changes.push(format!("Pool: {} → {}", before.pool_id, after.pool_id));
    }
    if before.frequency != after.frequency {
        changes.push(format!("Frequency: {} → {}", before.frequency, after.frequency));
    }
    if before.dow != after.dow || before.second_dow != after.second_dow {
        changes.push(format!(
            "Days of week: {}/{} → {}/{}",
            show(before.dow),
            show(before.second_dow),
            show(after.dow),
            show(after.second_dow)
        ));
    }
    if before.dom != after.dom || before.second_dom != after.second_dom {
        changes.push(format!(
            "Days of month: {}/{} → {}/{}",
            show(before.dom.map(i32::from)),
            show(before.second_dom.map(i32::from)),
            show(after.dom.map(i32::from)),
            show(after.second_dom.map(i32::from))
        ));
    }
    if before.window != after.window {
        changes.push(format!("Window: {} → {}", show(before.window), show(after.window)));
    }
    if before.starts_on != after.starts_on {
        changes.push(format!("Starts: {} → {}", show(before.starts_on), show(after.starts_on)));
    }
    if before.ends_on != after.ends_on {
        changes.push(format!("Ends: {} → {}", show(before.ends_on), show(after.ends_on)));
    }
    if before.cycle_anchor != after.cycle_anchor {
        changes.push(format!(
            "Cycle anchor: {} → {}",
            show(before.cycle_anchor),
            show(after.cycle_anchor)
        ));
    }
    if before.billing != after.billing {
        changes.push("Billing terms updated".to_string());
    }
    changes
}

/// Parameters for adding (or replacing) a window override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddOverride {
    pub plan_id: u64,
    /// Date the override applies to, YYYY-MM-DD
    pub date: String,
    pub window_start: String,
    pub window_end: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl AddOverride {
    pub fn validate(&self) -> Result<WindowOverride> {
        Ok(WindowOverride {
            date: parse_date("date", &self.date)?,
            window: TimeWindow::parse(&self.window_start, &self.window_end)?,
            reason: non_empty(self.reason.as_deref()),
        })
    }
}

/// Parameters for removing a window override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveOverride {
    pub plan_id: u64,
    pub date: String,
}

impl RemoveOverride {
    pub fn date(&self) -> Result<Date> {
        parse_date("date", &self.date)
    }
}

/// Parameters for pausing a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PausePlan {
    pub plan_id: u64,
    /// First paused day; defaults to today
    #[serde(default)]
    pub starts_on: Option<String>,
    /// Last paused day; paused indefinitely when absent
    #[serde(default)]
    pub until: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl PausePlan {
    pub fn validate(&self, today: Date) -> Result<PausePeriod> {
        let starts_on = parse_optional_date("starts_on", self.starts_on.as_deref())?.unwrap_or(today);
        let until = parse_optional_date("until", self.until.as_deref())?;
        if let Some(until) = until {
            if until < starts_on {
                return Err(PlanError::invalid_input("until")
                    .with_reason(format!("{until} is before the pause start {starts_on}")));
            }
        }
        Ok(PausePeriod {
            starts_on,
            until,
            reason: non_empty(self.reason.as_deref()),
        })
    }
}

/// Parameters for expanding a stored plan over a date range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schedule {
    pub plan_id: u64,
    /// First day of the range, YYYY-MM-DD
    pub from: String,
    /// Last day of the range, YYYY-MM-DD
    pub to: String,
}

impl Schedule {
    pub fn range(&self) -> Result<(Date, Date)> {
        Ok((parse_date("from", &self.from)?, parse_date("to", &self.to)?))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn weekly_request() -> CreatePlan {
        CreatePlan {
            pool_id: "pool-9".to_string(),
            frequency: "weekly".to_string(),
            dow: Some("mon".to_string()),
            window_start: Some("09:00".to_string()),
            window_end: Some("11:00".to_string()),
            starts_on: Some("2024-01-03".to_string()),
            price_cents: 7500,
            ..CreatePlan::default()
        }
    }

    #[test]
    fn test_create_plan_validates() {
        let draft = weekly_request().validate(date(2024, 1, 1)).unwrap();
        assert_eq!(draft.frequency, Frequency::Weekly);
        assert_eq!(draft.dow, Some(DayOfWeek::Mon));
        assert_eq!(draft.starts_on, Some(date(2024, 1, 3)));
        assert_eq!(draft.cycle_anchor, None);
        assert_eq!(draft.billing.currency, "USD");
    }

    #[test]
    fn test_cycle_anchor_follows_start_date() {
        let request = CreatePlan {
            frequency: "biweekly".to_string(),
            ..weekly_request()
        };
        // First Monday on or after the start date, whatever today is
        for today in [date(2024, 1, 1), date(2024, 1, 8), date(2025, 6, 1)] {
            let draft = request.validate(today).unwrap();
            assert_eq!(draft.cycle_anchor, Some(date(2024, 1, 8)));
        }
    }

    #[test]
    fn test_explicit_cycle_anchor() {
        let request = CreatePlan {
            frequency: "biweekly".to_string(),
            starts_on: None,
            cycle_anchor: Some("2024-01-15".to_string()),
            ..weekly_request()
        };
        let draft = request.validate(date(2024, 1, 8)).unwrap();
        assert_eq!(draft.cycle_anchor, Some(date(2024, 1, 15)));

        let off_day = CreatePlan {
            cycle_anchor: Some("2024-01-16".to_string()),
            ..request.clone()
        };
        assert!(matches!(
            off_day.validate(date(2024, 1, 8)),
            Err(PlanError::InvalidAnchor { .. })
        ));

        let malformed = CreatePlan {
            cycle_anchor: Some("next monday".to_string()),
            ..request
        };
        assert!(matches!(
            malformed.validate(date(2024, 1, 8)),
            Err(PlanError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_cycle_anchor_only_for_biweekly() {
        let weekly = CreatePlan {
            cycle_anchor: Some("2024-01-08".to_string()),
            ..weekly_request()
        };
        assert_eq!(weekly.validate(date(2024, 1, 1)).unwrap().cycle_anchor, None);

        let twice = CreatePlan {
            frequency: "twice_week".to_string(),
            second_dow: Some("thu".to_string()),
            ..weekly_request()
        };
        assert_eq!(twice.validate(date(2024, 1, 1)).unwrap().cycle_anchor, None);
    }

    #[test]
    fn test_cycle_anchor_defaults_to_today() {
        let request = CreatePlan {
            frequency: "biweekly".to_string(),
            starts_on: None,
            ..weekly_request()
        };
        let draft = request.validate(date(2024, 1, 10)).unwrap();
        assert_eq!(draft.cycle_anchor, Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_invalid_frequency() {
        let request = CreatePlan {
            frequency: "daily".to_string(),
            ..weekly_request()
        };
        assert!(matches!(
            request.validate(date(2024, 1, 1)),
            Err(PlanError::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_missing_and_invalid_anchors() {
        let missing = CreatePlan {
            dow: None,
            ..weekly_request()
        };
        assert!(matches!(
            missing.validate(date(2024, 1, 1)),
            Err(PlanError::MissingAnchor { .. })
        ));

        let monthly = CreatePlan {
            frequency: "monthly".to_string(),
            dom: Some(31),
            ..weekly_request()
        };
        match monthly.validate(date(2024, 1, 1)) {
            Err(PlanError::InvalidAnchor { field, .. }) => assert_eq!(field, "dom"),
            other => panic!("unexpected result: {other:?}"),
        }

        let twice = CreatePlan {
            frequency: "twice_week".to_string(),
            second_dow: Some("someday".to_string()),
            ..weekly_request()
        };
        match twice.validate(date(2024, 1, 1)) {
            Err(PlanError::InvalidAnchor { field, .. }) => assert_eq!(field, "second_dow"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_twice_week_requires_second_anchor() {
        let request = CreatePlan {
            frequency: "twice_week".to_string(),
            ..weekly_request()
        };
        match request.validate(date(2024, 1, 1)) {
            Err(PlanError::MissingAnchor { field }) => assert_eq!(field, "second_dow"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_other_family_anchor_is_ignored() {
        let request = CreatePlan {
            dom: Some(15),
            second_dow: Some("fri".to_string()),
            ..weekly_request()
        };
        let draft = request.validate(date(2024, 1, 1)).unwrap();
        assert_eq!(draft.dom, None);
        assert_eq!(draft.second_dow, None);
    }

    #[test]
    fn test_window_requires_both_ends() {
        let request = CreatePlan {
            window_end: None,
            ..weekly_request()
        };
        assert!(matches!(
            request.validate(date(2024, 1, 1)),
            Err(PlanError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_dates_and_bounds() {
        let bad_date = CreatePlan {
            starts_on: Some("2024-13-01".to_string()),
            ..weekly_request()
        };
        match bad_date.validate(date(2024, 1, 1)) {
            Err(PlanError::InvalidDate { field, .. }) => assert_eq!(field, "starts_on"),
            other => panic!("unexpected result: {other:?}"),
        }

        let inverted = CreatePlan {
            ends_on: Some("2023-12-31".to_string()),
            ..weekly_request()
        };
        assert!(matches!(
            inverted.validate(date(2024, 1, 1)),
            Err(PlanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_billing_validation() {
        let request = CreatePlan {
            billing_type: Some("fortnightly".to_string()),
            ..weekly_request()
        };
        assert!(request.validate(date(2024, 1, 1)).is_err());

        let request = CreatePlan {
            discount_pct: -5.0,
            ..weekly_request()
        };
        assert!(request.validate(date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let json = r#"{"pool_id":"p","frequency":"weekly","dow":"mon","equipment":{"pump":"x"}}"#;
        assert!(serde_json::from_str::<CreatePlan>(json).is_err());

        let json = r#"{"pool_id":"p","frequency":"weekly","dow":"mon"}"#;
        let request: CreatePlan = serde_json::from_str(json).unwrap();
        assert_eq!(request.currency, "USD");
    }

    #[test]
    fn test_round_trip_through_create_plan() {
        let plan = weekly_request()
            .validate(date(2024, 1, 1))
            .unwrap()
            .into_plan(3, Timestamp::UNIX_EPOCH);
        let again = CreatePlan::from(&plan).validate(date(2024, 1, 1)).unwrap();
        assert_eq!(again.into_plan(3, Timestamp::UNIX_EPOCH), plan);
    }

    #[test]
    fn test_update_keeps_anchor_when_dow_unchanged() {
        let plan = CreatePlan {
            frequency: "biweekly".to_string(),
            ..weekly_request()
        }
        .validate(date(2024, 1, 1))
        .unwrap()
        .into_plan(1, Timestamp::UNIX_EPOCH);

        let update = UpdatePlan {
            id: 1,
            starts_on: Some("2024-03-01".to_string()),
            ..UpdatePlan::default()
        };
        let (updated, changes) = update
            .apply(&plan, date(2024, 2, 1), Timestamp::UNIX_EPOCH)
            .unwrap();
        assert_eq!(updated.cycle_anchor, plan.cycle_anchor);
        assert_eq!(changes, vec!["Starts: 2024-01-03 → 2024-03-01".to_string()]);
    }

    #[test]
    fn test_update_reanchors_when_dow_changes() {
        let plan = CreatePlan {
            frequency: "biweekly".to_string(),
            ..weekly_request()
        }
        .validate(date(2024, 1, 1))
        .unwrap()
        .into_plan(1, Timestamp::UNIX_EPOCH);
        assert_eq!(plan.cycle_anchor, Some(date(2024, 1, 8)));

        let update = UpdatePlan {
            id: 1,
            dow: Some("wed".to_string()),
            ..UpdatePlan::default()
        };
        let (updated, changes) = update
            .apply(&plan, date(2024, 6, 1), Timestamp::UNIX_EPOCH)
            .unwrap();
        assert_eq!(updated.dow, Some(DayOfWeek::Wed));
        assert_eq!(updated.cycle_anchor, Some(date(2024, 1, 10)));
        assert!(changes.iter().any(|c| c.starts_with("Days of week")));
        assert!(changes.iter().any(|c| c.starts_with("Cycle anchor")));
    }

    #[test]
    fn test_update_without_changes_returns_current() {
        let plan = weekly_request()
            .validate(date(2024, 1, 1))
            .unwrap()
            .into_plan(1, Timestamp::UNIX_EPOCH);

        let update = UpdatePlan {
            id: 1,
            dow: Some("mon".to_string()),
            ..UpdatePlan::default()
        };
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let (unchanged, changes) = update.apply(&plan, date(2024, 1, 1), now).unwrap();
        assert!(changes.is_empty());
        assert_eq!(unchanged, plan);
        assert_eq!(unchanged.updated_at, Timestamp::UNIX_EPOCH);

        let update = UpdatePlan {
            id: 1,
            price_cents: Some(9000),
            ..UpdatePlan::default()
        };
        let (changed, _) = update.apply(&plan, date(2024, 1, 1), now).unwrap();
        assert_eq!(changed.updated_at, now);
    }

    #[test]
    fn test_update_from_biweekly_drops_anchor() {
        let plan = CreatePlan {
            frequency: "biweekly".to_string(),
            ..weekly_request()
        }
        .validate(date(2024, 1, 1))
        .unwrap()
        .into_plan(1, Timestamp::UNIX_EPOCH);

        let update = UpdatePlan {
            id: 1,
            frequency: Some("weekly".to_string()),
            ..UpdatePlan::default()
        };
        let (updated, _) = update
            .apply(&plan, date(2024, 1, 1), Timestamp::UNIX_EPOCH)
            .unwrap();
        assert_eq!(updated.cycle_anchor, None);
    }

    #[test]
    fn test_update_clear_window_and_end() {
        let plan = CreatePlan {
            ends_on: Some("2024-12-31".to_string()),
            ..weekly_request()
        }
        .validate(date(2024, 1, 1))
        .unwrap()
        .into_plan(1, Timestamp::UNIX_EPOCH);

        let update = UpdatePlan {
            id: 1,
            clear_window: true,
            clear_ends_on: true,
            ..UpdatePlan::default()
        };
        let (updated, _) = update
            .apply(&plan, date(2024, 1, 1), Timestamp::UNIX_EPOCH)
            .unwrap();
        assert_eq!(updated.window, None);
        assert_eq!(updated.ends_on, None);

        let conflicting = UpdatePlan {
            id: 1,
            clear_window: true,
            window_start: Some("08:00".to_string()),
            ..UpdatePlan::default()
        };
        assert!(conflicting
            .apply(&plan, date(2024, 1, 1), Timestamp::UNIX_EPOCH)
            .is_err());
    }

    #[test]
    fn test_update_switch_to_monthly_requires_dom() {
        let plan = weekly_request()
            .validate(date(2024, 1, 1))
            .unwrap()
            .into_plan(1, Timestamp::UNIX_EPOCH);
        let update = UpdatePlan {
            id: 1,
            frequency: Some("monthly".to_string()),
            ..UpdatePlan::default()
        };
        assert!(matches!(
            update.apply(&plan, date(2024, 1, 1), Timestamp::UNIX_EPOCH),
            Err(PlanError::MissingAnchor { .. })
        ));

        let update = UpdatePlan {
            dom: Some(-1),
            ..update
        };
        let (updated, _) = update
            .apply(&plan, date(2024, 1, 1), Timestamp::UNIX_EPOCH)
            .unwrap();
        assert_eq!(updated.frequency, Frequency::Monthly);
        assert_eq!(updated.dom, Some(DayOfMonth::LAST));
        assert_eq!(updated.dow, None);
        assert_eq!(updated.cycle_anchor, None);
    }

    #[test]
    fn test_override_and_pause_params() {
        let add = AddOverride {
            plan_id: 1,
            date: "2024-01-08".to_string(),
            window_start: "13:00".to_string(),
            window_end: "14:00".to_string(),
            reason: Some("  ".to_string()),
        };
        let o = add.validate().unwrap();
        assert_eq!(o.date, date(2024, 1, 8));
        assert_eq!(o.reason, None);

        let pause = PausePlan {
            plan_id: 1,
            starts_on: None,
            until: Some("2024-02-01".to_string()),
            reason: Some("Winter".to_string()),
        };
        let period = pause.validate(date(2024, 1, 15)).unwrap();
        assert_eq!(period.starts_on, date(2024, 1, 15));
        assert_eq!(period.until, Some(date(2024, 2, 1)));

        let inverted = PausePlan {
            until: Some("2024-01-01".to_string()),
            ..pause
        };
        assert!(inverted.validate(date(2024, 1, 15)).is_err());
    }

    #[test]
    fn test_schedule_range() {
        let schedule = Schedule {
            plan_id: 1,
            from: "2024-01-01".to_string(),
            to: "2024-01-31".to_string(),
        };
        assert_eq!(schedule.range().unwrap(), (date(2024, 1, 1), date(2024, 1, 31)));

        let bad = Schedule {
            to: "January".to_string(),
            ..schedule
        };
        assert!(matches!(bad.range(), Err(PlanError::InvalidDate { .. })));
    }
}
