//! Command handlers: call the scheduler and render the outcome.

use anyhow::{Context, Result};
use poolplan_core::{
    display::{Invoices, Overrides, Plans, VisitDate, Visits},
    params::{
        AddOverride, CreatePlan, DeletePlan, Id, ListPlans, PausePlan, RemoveOverride, Schedule,
        UpdatePlan,
    },
    CreateResult, DeleteResult, OperationStatus, Scheduler, UpdateResult,
};
use serde_json::json;

use crate::{
    cli::{OverrideCommands, PlanCommands, ScheduleArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer) -> Self {
        Self {
            scheduler,
            renderer,
        }
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        &self.renderer
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(&args.into()).await,
            PlanCommands::List(args) => self.list_plans(&(&args).into(), args.json).await,
            PlanCommands::Show(args) => self.show_plan(&(&args).into(), args.json).await,
            PlanCommands::Update(args) => self.update_plan(&args.into()).await,
            PlanCommands::Delete(args) => self.delete_plan(&args.into()).await,
        }
    }

    pub async fn handle_override_command(&self, command: OverrideCommands) -> Result<()> {
        match command {
            OverrideCommands::Add(args) => self.add_override(&args.into()).await,
            OverrideCommands::Remove(args) => self.remove_override(&args.into()).await,
            OverrideCommands::List(args) => {
                self.list_overrides(&Id { id: args.plan_id }, args.json).await
            }
        }
    }

    async fn create_plan(&self, params: &CreatePlan) -> Result<()> {
        let plan = self
            .scheduler
            .create_plan(params)
            .await
            .context("Failed to create plan")?;
        self.renderer.render(&CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self, params: &ListPlans, as_json: bool) -> Result<()> {
        let plans = self
            .scheduler
            .list_plans(params)
            .await
            .context("Failed to list plans")?;
        if as_json {
            return self.renderer.render_json(&plans);
        }
        self.renderer.render(&Plans(plans).to_string())
    }

    async fn show_plan(&self, params: &Id, as_json: bool) -> Result<()> {
        let plan = self
            .scheduler
            .require_plan(params.id)
            .await
            .with_context(|| format!("Failed to show plan {}", params.id))?;
        let pause = self.scheduler.get_pause(params).await?;
        let overrides = self.scheduler.list_overrides(params).await?;
        let next = self
            .scheduler
            .next_visit(params)
            .await
            .context("Failed to find the next visit")?;

        if as_json {
            return self.renderer.render_json(&json!({
                "plan": plan,
                "pause": pause,
                "overrides": overrides,
                "next_visit": next,
            }));
        }

        let mut output = plan.to_string();
        if let Some(pause) = &pause {
            output.push_str(&format!("- Pause: {pause}\n"));
        }
        match next {
            Some(visit) => output.push_str(&format!("- Next visit: {visit}\n")),
            None => output.push_str("- Next visit: none scheduled\n"),
        }
        if !overrides.is_empty() {
            output.push_str("\n## Window overrides\n\n");
            output.push_str(&Overrides(overrides).to_string());
        }
        self.renderer.render(&output)
    }

    async fn update_plan(&self, params: &UpdatePlan) -> Result<()> {
        let (plan, changes) = self
            .scheduler
            .update_plan(params)
            .await
            .with_context(|| format!("Failed to update plan {}", params.id))?;
        self.renderer
            .render(&UpdateResult::with_changes(plan, changes).to_string())
    }

    async fn delete_plan(&self, params: &DeletePlan) -> Result<()> {
        let plan = self
            .scheduler
            .delete_plan(params)
            .await
            .with_context(|| format!("Failed to delete plan {}", params.id))?;
        self.renderer.render(&DeleteResult::new(plan).to_string())
    }

    async fn add_override(&self, params: &AddOverride) -> Result<()> {
        let (entry, replaced) = self
            .scheduler
            .add_override(params)
            .await
            .context("Failed to set window override")?;
        let output = if replaced {
            UpdateResult::new(entry).to_string()
        } else {
            CreateResult::new(entry).to_string()
        };
        self.renderer.render(&output)
    }

    async fn remove_override(&self, params: &RemoveOverride) -> Result<()> {
        self.scheduler
            .remove_override(params)
            .await
            .context("Failed to remove window override")?;
        self.renderer.render(
            &OperationStatus::success(format!(
                "Removed override for plan {} on {}",
                params.plan_id, params.date
            ))
            .to_string(),
        )
    }

    async fn list_overrides(&self, params: &Id, as_json: bool) -> Result<()> {
        let overrides = self
            .scheduler
            .list_overrides(params)
            .await
            .context("Failed to list window overrides")?;
        if as_json {
            return self.renderer.render_json(&overrides);
        }
        self.renderer.render(&Overrides(overrides).to_string())
    }

    pub async fn pause_plan(&self, params: &PausePlan) -> Result<()> {
        let pause = self
            .scheduler
            .pause_plan(params)
            .await
            .with_context(|| format!("Failed to pause plan {}", params.plan_id))?;
        self.renderer.render(
            &OperationStatus::success(format!("Plan {} {pause}", params.plan_id)).to_string(),
        )
    }

    pub async fn resume_plan(&self, params: &Id) -> Result<()> {
        let pause = self
            .scheduler
            .resume_plan(params)
            .await
            .with_context(|| format!("Failed to resume plan {}", params.id))?;
        let message = match self.scheduler.next_visit(params).await? {
            Some(visit) => format!(
                "Resumed plan {} (was {pause}); next visit {}",
                params.id,
                VisitDate(visit.date)
            ),
            None => format!("Resumed plan {} (was {pause})", params.id),
        };
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    pub async fn schedule(&self, args: &ScheduleArgs) -> Result<()> {
        let params = Schedule::from(args);
        let schedule = self
            .scheduler
            .schedule(&params)
            .await
            .with_context(|| format!("Failed to schedule plan {}", params.plan_id))?;
        if args.json {
            return self.renderer.render_json(&schedule);
        }
        self.renderer.render(&Visits(&schedule).to_string())
    }

    pub async fn invoice(&self, args: &ScheduleArgs) -> Result<()> {
        let params = Schedule::from(args);
        let invoices = self
            .scheduler
            .invoices(&params)
            .await
            .with_context(|| format!("Failed to invoice plan {}", params.plan_id))?;
        if args.json {
            return self.renderer.render_json(&invoices);
        }
        self.renderer.render(&Invoices(&invoices).to_string())
    }
}
