//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use super::{datetime::VisitDate, models::Money};
use crate::{
    models::{ServicePlan, WindowOverride},
    scheduler::{PlanInvoices, PlanSchedule},
};

/// Newtype wrapper for displaying a list of plans as a markdown table.
///
/// # Examples
///
/// ```rust
/// use poolplan_core::display::Plans;
///
/// assert_eq!(Plans(Vec::new()).to_string(), "No plans found.\n");
/// ```
pub struct Plans(pub Vec<ServicePlan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServicePlan> {
        self.0.iter()
    }
}

impl IntoIterator for Plans {
    type Item = ServicePlan;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        writeln!(f, "| ID | Pool | Cadence | Window | Starts | Ends |")?;
        writeln!(f, "|---:|------|---------|--------|--------|------|")?;
        for plan in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} |",
                plan.id,
                plan.pool_id,
                plan.cadence(),
                plan.window.map_or_else(|| "-".to_string(), |w| w.to_string()),
                plan.starts_on.map_or_else(|| "-".to_string(), |d| d.to_string()),
                plan.ends_on.map_or_else(|| "-".to_string(), |d| d.to_string()),
            )?;
        }
        Ok(())
    }
}

/// Displays the visits of a [`PlanSchedule`] as a numbered list.
pub struct Visits<'a>(pub &'a PlanSchedule);

impl fmt::Display for Visits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.0;
        writeln!(
            f,
            "# Schedule for plan {} ({})",
            schedule.plan.id, schedule.plan.pool_id
        )?;
        writeln!(f)?;
        writeln!(f, "- Cadence: {}", schedule.plan.cadence())?;
        writeln!(f, "- Range: {} to {}", schedule.from, schedule.to)?;
        if let Some(pause) = &schedule.pause {
            writeln!(f, "- Pause: {pause}")?;
        }
        writeln!(f)?;

        if schedule.occurrences.is_empty() {
            return writeln!(f, "No visits in this range.");
        }
        for (index, occurrence) in schedule.occurrences.iter().enumerate() {
            writeln!(f, "{}. {occurrence}", index + 1)?;
        }
        writeln!(f)?;
        writeln!(f, "{} visit(s)", schedule.occurrences.len())
    }
}

/// Displays the batches of a [`PlanInvoices`] as a markdown table.
pub struct Invoices<'a>(pub &'a PlanInvoices);

impl fmt::Display for Invoices<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoices = self.0;
        let currency = invoices.plan.billing.currency.as_str();
        writeln!(
            f,
            "# Invoices for plan {} ({})",
            invoices.plan.id, invoices.plan.pool_id
        )?;
        writeln!(f)?;
        writeln!(f, "- Billing: {}", invoices.plan.billing.billing_type.label())?;
        writeln!(f, "- Range: {} to {}", invoices.from, invoices.to)?;
        writeln!(f)?;

        if invoices.batches.is_empty() {
            return writeln!(f, "Nothing to invoice in this range.");
        }

        writeln!(f, "| Period | Visits | Total |")?;
        writeln!(f, "|--------|-------:|------:|")?;
        for batch in &invoices.batches {
            let period = if batch.period_start == batch.period_end {
                VisitDate(batch.period_start).to_string()
            } else {
                format!("{} to {}", batch.period_start, batch.period_end)
            };
            writeln!(
                f,
                "| {period} | {} | {} |",
                batch.visits.len(),
                Money(batch.total_cents, &batch.currency)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {}", Money(invoices.total_cents(), currency))
    }
}

/// Newtype wrapper for displaying a plan's window overrides.
pub struct Overrides(pub Vec<WindowOverride>);

impl fmt::Display for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No window overrides.");
        }
        for entry in &self.0 {
            writeln!(f, "- {entry}")?;
        }
        Ok(())
    }
}
