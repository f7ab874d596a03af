//! Grouping of scheduled visits into invoice batches.
//!
//! Per-visit plans bill each visit on its own. Periodic plans bill every
//! visit that falls in a calendar month, quarter (starting January, April,
//! July and October) or year together. Periods with no visits produce no
//! batch.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanError, Result},
    models::{BillingTerms, Occurrence},
};

/// The visits billed together on one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBatch {
    /// First day of the billing period
    pub period_start: Date,
    /// Last day of the billing period (inclusive)
    pub period_end: Date,
    /// Visit dates in the period, ascending
    pub visits: Vec<Date>,
    /// Visit count times the per-visit total, in minor units
    pub total_cents: i64,
    pub currency: String,
}

/// Groups `occurrences` into batches according to `terms.billing_type`.
pub fn invoice_batches(terms: &BillingTerms, occurrences: &[Occurrence]) -> Result<Vec<InvoiceBatch>> {
    let mut periods: BTreeMap<(Date, Date), Vec<Date>> = BTreeMap::new();
    for occurrence in occurrences {
        let period = match terms.billing_type.period_months() {
            Some(months) => period_containing(occurrence.date, months)?,
            None => (occurrence.date, occurrence.date),
        };
        periods.entry(period).or_default().push(occurrence.date);
    }

    let per_visit = terms.visit_total_cents();
    Ok(periods
        .into_iter()
        .map(|((period_start, period_end), mut visits)| {
            visits.sort_unstable();
            visits.dedup();
            let total_cents = per_visit.saturating_mul(visits.len() as i64);
            InvoiceBatch {
                period_start,
                period_end,
                visits,
                total_cents,
                currency: terms.currency.clone(),
            }
        })
        .collect())
}

/// The calendar period of `months` length (1, 3 or 12) containing `date`.
fn period_containing(date: Date, months: i8) -> Result<(Date, Date)> {
    let first_month = (date.month() - 1) / months * months + 1;
    let last_month = first_month + months - 1;
    let start = Date::new(date.year(), first_month, 1);
    let end = Date::new(date.year(), last_month, 1).map(|d| d.last_of_month());
    match (start, end) {
        (Ok(start), Ok(end)) => Ok((start, end)),
        (Err(e), _) | (_, Err(e)) => Err(PlanError::invalid_input("billing_type")
            .with_reason(format!("cannot compute billing period for {date}: {e}"))),
    }
}
