//! Resolution of a plan's frequency and anchors into a stepping rule.

use jiff::{civil::Date, ToSpan};

use crate::{
    error::{PlanError, Result},
    models::{DayOfMonth, DayOfWeek, Frequency, ServicePlan},
};

/// A validated recurrence pattern. Building one is the only fallible step of
/// expansion, so a malformed plan never yields a partial sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Every week on each listed day
    Weekly(Vec<DayOfWeek>),
    /// Every 14 days from a fixed anchor date
    Biweekly(Date),
    /// Every month on each listed day
    Monthly(Vec<DayOfMonth>),
}

impl Rule {
    pub(crate) fn from_plan(plan: &ServicePlan) -> Result<Self> {
        match plan.frequency {
            Frequency::Weekly | Frequency::OnceWeek => Ok(Rule::Weekly(vec![require_dow(plan)?])),
            Frequency::TwiceWeek => {
                let first = require_dow(plan)?;
                let second = plan
                    .second_dow
                    .ok_or_else(|| PlanError::missing_anchor("second_dow"))?;
                if first == second {
                    return Err(PlanError::invalid_anchor(
                        "second_dow",
                        format!("must differ from dow ({first})"),
                    ));
                }
                Ok(Rule::Weekly(vec![first, second]))
            }
            Frequency::Biweekly => {
                let dow = require_dow(plan)?;
                let anchor = plan
                    .cycle_anchor
                    .ok_or_else(|| PlanError::missing_anchor("cycle_anchor"))?;
                if !dow.matches(anchor) {
                    return Err(PlanError::invalid_anchor(
                        "cycle_anchor",
                        format!("{anchor} does not fall on {dow}"),
                    ));
                }
                Ok(Rule::Biweekly(anchor))
            }
            Frequency::Monthly | Frequency::OnceMonth => {
                Ok(Rule::Monthly(vec![require_dom(plan)?]))
            }
            Frequency::TwiceMonth => {
                let first = require_dom(plan)?;
                let second = plan
                    .second_dom
                    .ok_or_else(|| PlanError::missing_anchor("second_dom"))?;
                if first == second {
                    return Err(PlanError::invalid_anchor(
                        "second_dom",
                        format!("must differ from dom ({first})"),
                    ));
                }
                Ok(Rule::Monthly(vec![first, second]))
            }
        }
    }

    /// All dates in `[lower, upper]` produced by the rule, ascending and
    /// without duplicates.
    pub(crate) fn dates_between(&self, lower: Date, upper: Date) -> Result<Vec<Date>> {
        let mut dates = Vec::new();
        match self {
            Rule::Weekly(days) => {
                for day in days {
                    step_from(&mut dates, add_days(lower, day.days_from(lower)), 7, upper);
                }
            }
            Rule::Biweekly(anchor) => {
                let delta = anchor
                    .until(lower)
                    .map_err(|e| PlanError::invalid_anchor("cycle_anchor", e.to_string()))?
                    .get_days();
                let offset = (14 - i64::from(delta).rem_euclid(14)) % 14;
                step_from(&mut dates, add_days(lower, offset), 14, upper);
            }
            Rule::Monthly(days) => {
                let mut month = Some(lower.first_of_month());
                while let Some(current) = month.filter(|m| *m <= upper) {
                    for day in days {
                        let date = day.resolve(current);
                        if date >= lower && date <= upper {
                            dates.push(date);
                        }
                    }
                    month = current.checked_add(1.month()).ok();
                }
            }
        }
        dates.sort_unstable();
        dates.dedup();
        Ok(dates)
    }
}

fn require_dow(plan: &ServicePlan) -> Result<DayOfWeek> {
    plan.dow.ok_or_else(|| PlanError::missing_anchor("dow"))
}

fn require_dom(plan: &ServicePlan) -> Result<DayOfMonth> {
    plan.dom.ok_or_else(|| PlanError::missing_anchor("dom"))
}

/// Adds whole days, returning `None` past the end of the supported calendar.
pub(crate) fn add_days(date: Date, days: i64) -> Option<Date> {
    date.checked_add(days.days()).ok()
}

fn step_from(dates: &mut Vec<Date>, first: Option<Date>, step: i64, upper: Date) {
    let mut next = first;
    while let Some(date) = next.filter(|d| *d <= upper) {
        dates.push(date);
        next = add_days(date, step);
    }
}

/// The first date on or after `from` that falls on `dow`. Used to fix a
/// biweekly plan's cycle anchor.
pub fn first_on_or_after(dow: DayOfWeek, from: Date) -> Option<Date> {
    add_days(from, dow.days_from(from))
}
