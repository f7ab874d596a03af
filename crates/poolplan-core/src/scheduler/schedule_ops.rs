//! Schedule expansion and invoicing for stored plans.

use jiff::civil::Date;
use serde::Serialize;

use super::{today, Scheduler};
use crate::{
    billing::{invoice_batches, InvoiceBatch},
    error::{PlanError, Result},
    models::{Occurrence, PausePeriod, ServicePlan},
    params::{Id, Schedule},
    recurrence,
};

/// A plan's visits within a requested range.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSchedule {
    pub plan: ServicePlan,
    pub from: Date,
    pub to: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<PausePeriod>,
    pub occurrences: Vec<Occurrence>,
}

/// A plan's invoice batches within a requested range.
#[derive(Debug, Clone, Serialize)]
pub struct PlanInvoices {
    pub plan: ServicePlan,
    pub from: Date,
    pub to: Date,
    pub batches: Vec<InvoiceBatch>,
}

impl PlanInvoices {
    /// Sum of all batch totals, in minor units.
    pub fn total_cents(&self) -> i64 {
        self.batches
            .iter()
            .fold(0i64, |sum, batch| sum.saturating_add(batch.total_cents))
    }
}

impl Scheduler {
    /// Loads a plan with its overrides and pause and expands it over the
    /// requested range.
    pub async fn schedule(&self, params: &Schedule) -> Result<PlanSchedule> {
        let (from, to) = params.range()?;
        let plan_id = params.plan_id;
        let (plan, overrides, pause) = self
            .with_db(move |db| {
                let plan = db
                    .get_plan(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })?;
                let overrides = if from <= to {
                    db.list_overrides(plan_id, Some((from, to)))?
                } else {
                    Vec::new()
                };
                let pause = db.get_pause(plan_id)?;
                Ok((plan, overrides, pause))
            })
            .await?;

        let occurrences = recurrence::expand(&plan, &overrides, pause.as_ref(), from, to)?;
        log::debug!(
            "Expanded plan {plan_id} over {from}..{to}: {} visit(s)",
            occurrences.len()
        );
        Ok(PlanSchedule {
            plan,
            from,
            to,
            pause,
            occurrences,
        })
    }

    /// Expands a plan over the range and groups the visits for billing.
    pub async fn invoices(&self, params: &Schedule) -> Result<PlanInvoices> {
        let schedule = self.schedule(params).await?;
        let batches = invoice_batches(&schedule.plan.billing, &schedule.occurrences)?;
        Ok(PlanInvoices {
            plan: schedule.plan,
            from: schedule.from,
            to: schedule.to,
            batches,
        })
    }

    /// The plan's next visit on or after today.
    pub async fn next_visit(&self, params: &Id) -> Result<Option<Occurrence>> {
        self.next_visit_from(params, today()).await
    }

    /// The plan's next visit on or after `from`.
    pub async fn next_visit_from(&self, params: &Id, from: Date) -> Result<Option<Occurrence>> {
        let plan_id = params.id;
        let (plan, overrides, pause) = self
            .with_db(move |db| {
                let plan = db
                    .get_plan(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })?;
                let overrides = db.list_overrides(plan_id, None)?;
                let pause = db.get_pause(plan_id)?;
                Ok((plan, overrides, pause))
            })
            .await?;
        recurrence::next_occurrence(&plan, &overrides, pause.as_ref(), from)
    }
}
