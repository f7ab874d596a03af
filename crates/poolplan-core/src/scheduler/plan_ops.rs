//! Plan operations for the Scheduler.

use jiff::Timestamp;

use super::{today, Scheduler};
use crate::{
    error::{PlanError, Result},
    models::ServicePlan,
    params::{CreatePlan, DeletePlan, Id, ListPlans, UpdatePlan},
};

impl Scheduler {
    /// Validates and stores a new plan.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<ServicePlan> {
        let draft = params.validate(today())?;
        let plan = self.with_db(move |db| db.insert_plan(&draft)).await?;
        log::info!("Created plan {} ({}) for pool {}", plan.id, plan.frequency, plan.pool_id);
        Ok(plan)
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<ServicePlan>> {
        let plan_id = params.id;
        self.with_db(move |db| db.get_plan(plan_id)).await
    }

    /// Retrieves a plan, failing with `PlanNotFound` when it does not exist.
    pub async fn require_plan(&self, plan_id: u64) -> Result<ServicePlan> {
        self.get_plan(&Id { id: plan_id })
            .await?
            .ok_or(PlanError::PlanNotFound { id: plan_id })
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<ServicePlan>> {
        let pool_id = params.pool_id.clone();
        self.with_db(move |db| db.list_plans(pool_id.as_deref())).await
    }

    /// Merges the update onto the stored plan, revalidates and stores it.
    ///
    /// Returns the updated plan along with a description of each change.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<(ServicePlan, Vec<String>)> {
        let update = params.clone();
        let today = today();
        let (plan, changes) = self
            .with_db(move |db| {
                let current = db
                    .get_plan(update.id)?
                    .ok_or(PlanError::PlanNotFound { id: update.id })?;
                let (updated, changes) = update.apply(&current, today, Timestamp::now())?;
                if !changes.is_empty() {
                    db.update_plan(&updated)?;
                }
                Ok((updated, changes))
            })
            .await?;
        log::debug!("Updated plan {} with {} change(s)", plan.id, changes.len());
        Ok((plan, changes))
    }

    /// Permanently deletes a plan with its overrides and pause.
    ///
    /// Requires `confirmed`; returns the plan as it was before deletion.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<ServicePlan> {
        if !params.confirmed {
            return Err(PlanError::invalid_input("confirmed")
                .with_reason("deleting a plan must be explicitly confirmed"));
        }
        let plan_id = params.id;
        let plan = self
            .with_db(move |db| {
                let plan = db
                    .get_plan(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })?;
                db.delete_plan(plan_id)?;
                Ok(plan)
            })
            .await?;
        log::info!("Deleted plan {plan_id}");
        Ok(plan)
    }
}
