//! Expansion of service plans into scheduled visits.
//!
//! [`expand`] is a pure function: it reads only its arguments, performs no
//! I/O and holds no shared state, so callers may run it concurrently, cache
//! its output or recompute it freely.
//!
//! ```text
//! ServicePlan ──▶ Rule ──▶ candidate dates ──▶ clip ──▶ drop paused ──▶ resolve windows
//!                (anchors      (stepping)     (plan +    (PausePeriod)  (override, then
//!                 checked)                     range)                     plan default)
//! ```
//!
//! # Frequencies
//!
//! | frequency                 | anchor                    | visits            |
//! |---------------------------|---------------------------|-------------------|
//! | `weekly`, `once_week`     | `dow`                     | every week        |
//! | `twice_week`              | `dow`, `second_dow`       | both days weekly  |
//! | `biweekly`                | `dow`, `cycle_anchor`     | every 14 days     |
//! | `monthly`, `once_month`   | `dom`                     | every month       |
//! | `twice_month`             | `dom`, `second_dom`       | both days monthly |
//!
//! A `dom` of `-1` selects the last day of each month.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use poolplan_core::{
//!     models::{BillingTerms, DayOfWeek, Frequency, ServicePlan},
//!     recurrence::expand,
//! };
//!
//! let plan = ServicePlan {
//!     id: 1,
//!     pool_id: "pool-1".to_string(),
//!     frequency: Frequency::Weekly,
//!     dow: Some(DayOfWeek::Mon),
//!     second_dow: None,
//!     dom: None,
//!     second_dom: None,
//!     window: None,
//!     starts_on: Some(date(2024, 1, 1)),
//!     ends_on: None,
//!     cycle_anchor: None,
//!     billing: BillingTerms::default(),
//!     created_at: Timestamp::UNIX_EPOCH,
//!     updated_at: Timestamp::UNIX_EPOCH,
//! };
//!
//! let visits = expand(&plan, &[], None, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
//! assert_eq!(visits.len(), 5);
//! assert_eq!(visits[4].date, date(2024, 1, 29));
//! ```

use std::collections::HashMap;

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Occurrence, PausePeriod, ServicePlan, TimeWindow, WindowOverride},
};

mod rule;


pub use rule::first_on_or_after;
use rule::{add_days, Rule};

/// Number of days searched per pass by [`next_occurrence`]; every valid
/// rule yields at least one date in any window this long.
const SEARCH_WINDOW_DAYS: i64 = 62;

/// Passes [`next_occurrence`] makes before giving up (roughly four years).
const SEARCH_PASSES: usize = 24;

/// Checks that a plan carries every anchor its frequency needs.
pub fn validate(plan: &ServicePlan) -> Result<()> {
    Rule::from_plan(plan).map(|_| ())
}

/// Expands a plan into its visits within `[range_start, range_end]`.
///
/// The range is further clipped to the plan's `starts_on`/`ends_on`. Dates
/// covered by `pause` are dropped. Each visit's window is the override for
/// that exact date when one exists, otherwise the plan's default window.
/// When `overrides` lists the same date twice, the later entry wins.
///
/// # Errors
///
/// Returns `MissingAnchor` or `InvalidAnchor` when the plan lacks the anchors
/// its frequency needs. An empty range is not an error: it yields an empty
/// sequence.
pub fn expand(
    plan: &ServicePlan,
    overrides: &[WindowOverride],
    pause: Option<&PausePeriod>,
    range_start: Date,
    range_end: Date,
) -> Result<Vec<Occurrence>> {
    let rule = Rule::from_plan(plan)?;

    let Some((lower, upper)) = plan.effective_range(range_start, range_end) else {
        return Ok(Vec::new());
    };

    let by_date: HashMap<Date, TimeWindow> =
        overrides.iter().map(|o| (o.date, o.window)).collect();

    let occurrences = rule
        .dates_between(lower, upper)?
        .into_iter()
        .filter(|date| !pause.is_some_and(|p| p.covers(*date)))
        .map(|date| {
            let window = by_date.get(&date).copied().or(plan.window);
            Occurrence::new(date, window)
        })
        .collect();

    Ok(occurrences)
}

/// Finds the first visit on or after `from`, looking ahead about four years
/// from the later of `from` and the plan's `starts_on`.
///
/// Returns `Ok(None)` when the plan has ended, is paused indefinitely, or
/// produces nothing within the search horizon.
pub fn next_occurrence(
    plan: &ServicePlan,
    overrides: &[WindowOverride],
    pause: Option<&PausePeriod>,
    from: Date,
) -> Result<Option<Occurrence>> {
    // Validate up front so an invalid plan errors even when nothing is searched.
    Rule::from_plan(plan)?;

    let mut lower = plan.starts_on.map_or(from, |starts_on| starts_on.max(from));
    for _ in 0..SEARCH_PASSES {
        if plan.ends_on.is_some_and(|ends_on| lower > ends_on) {
            return Ok(None);
        }
        if let Some(pause) = pause.filter(|p| p.covers(lower)) {
            match pause.until.and_then(|until| add_days(until, 1)) {
                Some(resume) => lower = resume,
                None => return Ok(None),
            }
        }
        let Some(upper) = add_days(lower, SEARCH_WINDOW_DAYS - 1) else {
            return Ok(None);
        };
        if let Some(first) = expand(plan, overrides, pause, lower, upper)?.into_iter().next() {
            return Ok(Some(first));
        }
        match add_days(upper, 1) {
            Some(next) => lower = next,
            None => return Ok(None),
        }
    }
    Ok(None)
}
