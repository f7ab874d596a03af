//! Window override and pause operations for the Scheduler.

use super::{today, Scheduler};
use crate::{
    error::{PlanError, Result},
    models::{PausePeriod, WindowOverride},
    params::{AddOverride, Id, PausePlan, RemoveOverride},
};

impl Scheduler {
    /// Stores an override for one date, replacing any existing one.
    ///
    /// Returns the stored override and whether an earlier one was replaced.
    pub async fn add_override(&self, params: &AddOverride) -> Result<(WindowOverride, bool)> {
        let entry = params.validate()?;
        let plan_id = params.plan_id;
        let stored = entry.clone();
        let replaced = self
            .with_db(move |db| {
                if !db.plan_exists(plan_id)? {
                    return Err(PlanError::PlanNotFound { id: plan_id });
                }
                db.upsert_override(plan_id, &stored)
            })
            .await?;
        log::debug!("Override for plan {plan_id} on {} (replaced: {replaced})", entry.date);
        Ok((entry, replaced))
    }

    pub async fn remove_override(&self, params: &RemoveOverride) -> Result<()> {
        let date = params.date()?;
        let plan_id = params.plan_id;
        self.with_db(move |db| {
            if !db.plan_exists(plan_id)? {
                return Err(PlanError::PlanNotFound { id: plan_id });
            }
            if db.remove_override(plan_id, date)? {
                Ok(())
            } else {
                Err(PlanError::invalid_input("date")
                    .with_reason(format!("plan {plan_id} has no override on {date}")))
            }
        })
        .await
    }

    /// Lists a plan's overrides in date order.
    pub async fn list_overrides(&self, params: &Id) -> Result<Vec<WindowOverride>> {
        let plan_id = params.id;
        self.with_db(move |db| {
            if !db.plan_exists(plan_id)? {
                return Err(PlanError::PlanNotFound { id: plan_id });
            }
            db.list_overrides(plan_id, None)
        })
        .await
    }

    /// Pauses a plan, replacing any existing pause.
    pub async fn pause_plan(&self, params: &PausePlan) -> Result<PausePeriod> {
        let pause = params.validate(today())?;
        let plan_id = params.plan_id;
        let stored = pause.clone();
        self.with_db(move |db| {
            if !db.plan_exists(plan_id)? {
                return Err(PlanError::PlanNotFound { id: plan_id });
            }
            db.set_pause(plan_id, &stored)
        })
        .await?;
        log::info!("Paused plan {plan_id} from {}", pause.starts_on);
        Ok(pause)
    }

    /// Clears a plan's pause, returning the pause that was lifted.
    pub async fn resume_plan(&self, params: &Id) -> Result<PausePeriod> {
        let plan_id = params.id;
        let pause = self
            .with_db(move |db| {
                if !db.plan_exists(plan_id)? {
                    return Err(PlanError::PlanNotFound { id: plan_id });
                }
                let pause = db.get_pause(plan_id)?.ok_or_else(|| {
                    PlanError::invalid_input("plan_id")
                        .with_reason(format!("plan {plan_id} is not paused"))
                })?;
                db.clear_pause(plan_id)?;
                Ok(pause)
            })
            .await?;
        log::info!("Resumed plan {plan_id}");
        Ok(pause)
    }

    pub async fn get_pause(&self, params: &Id) -> Result<Option<PausePeriod>> {
        let plan_id = params.id;
        self.with_db(move |db| {
            if !db.plan_exists(plan_id)? {
                return Err(PlanError::PlanNotFound { id: plan_id });
            }
            db.get_pause(plan_id)
        })
        .await
    }
}
