//! Command-line argument definitions using clap.
//!
//! Each command gets a clap `Args` wrapper that converts into the matching
//! core parameter type, so core params stay free of CLI framework derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Scheduler
//! ```
//!
//! Windows are accepted in the compact `HH:MM-HH:MM` form and split into the
//! separate start and end fields the core params expect.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use poolplan_core::params::{
    AddOverride, CreatePlan, DeletePlan, Id, ListPlans, PausePlan, RemoveOverride, Schedule,
    UpdatePlan,
};

/// Splits `HH:MM-HH:MM` into start and end. A value without a separator is
/// passed on as a lone start so validation reports the incomplete window.
fn split_window(window: Option<String>) -> (Option<String>, Option<String>) {
    match window {
        Some(window) => match window.split_once('-') {
            Some((start, end)) => (Some(start.to_string()), Some(end.to_string())),
            None => (Some(window), None),
        },
        None => (None, None),
    }
}

/// Create a new service plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Identifier of the serviced pool
    pub pool_id: String,
    /// weekly, biweekly, monthly, once_week, twice_week, once_month or
    /// twice_month
    #[arg(short, long)]
    pub frequency: String,
    /// Day of the week for week-based frequencies (mon..sun)
    #[arg(long)]
    pub dow: Option<String>,
    /// Second day of the week for twice_week
    #[arg(long)]
    pub second_dow: Option<String>,
    /// Day of the month for month-based frequencies (1-28, or -1 for the last day)
    #[arg(long, allow_negative_numbers = true)]
    pub dom: Option<i32>,
    /// Second day of the month for twice_month
    #[arg(long, allow_negative_numbers = true)]
    pub second_dom: Option<i32>,
    /// Default visit window as HH:MM-HH:MM
    #[arg(short, long)]
    pub window: Option<String>,
    /// First day of service (YYYY-MM-DD)
    #[arg(long)]
    pub starts_on: Option<String>,
    /// Last day of service (YYYY-MM-DD)
    #[arg(long)]
    pub ends_on: Option<String>,
    /// Biweekly parity date on the plan's dow (YYYY-MM-DD)
    #[arg(long)]
    pub cycle_anchor: Option<String>,
    /// Price of one visit in minor units (cents)
    #[arg(long, default_value_t = 0)]
    pub price_cents: i64,
    /// ISO 4217 currency code
    #[arg(long, default_value = "USD")]
    pub currency: String,
    /// Tax percentage applied after any discount
    #[arg(long, default_value_t = 0.0)]
    pub tax_pct: f64,
    /// Discount percentage
    #[arg(long, default_value_t = 0.0)]
    pub discount_pct: f64,
    /// per_visit, monthly, quarterly or annually
    #[arg(long)]
    pub billing_type: Option<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        let (window_start, window_end) = split_window(val.window);
        CreatePlan {
            pool_id: val.pool_id,
            frequency: val.frequency,
            dow: val.dow,
            second_dow: val.second_dow,
            dom: val.dom,
            second_dom: val.second_dom,
            window_start,
            window_end,
            starts_on: val.starts_on,
            ends_on: val.ends_on,
            cycle_anchor: val.cycle_anchor,
            price_cents: val.price_cents,
            currency: val.currency,
            tax_pct: val.tax_pct,
            discount_pct: val.discount_pct,
            billing_type: val.billing_type,
        }
    }
}

/// List service plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Only list plans for this pool
    #[arg(long)]
    pub pool: Option<String>,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListPlansArgs> for ListPlans {
    fn from(val: &ListPlansArgs) -> Self {
        ListPlans {
            pool_id: val.pool.clone(),
        }
    }
}

/// Show a plan with its pause, overrides and next visit
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ShowPlanArgs> for Id {
    fn from(val: &ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a service plan; omitted options keep their current value
#[derive(Args)]
pub struct UpdatePlanArgs {
    /// ID of the plan to update
    pub id: u64,
    #[arg(long)]
    pub pool_id: Option<String>,
    #[arg(short, long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub dow: Option<String>,
    #[arg(long)]
    pub second_dow: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub dom: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub second_dom: Option<i32>,
    /// New default window as HH:MM-HH:MM
    #[arg(short, long, conflicts_with = "clear_window")]
    pub window: Option<String>,
    /// Remove the default window
    #[arg(long)]
    pub clear_window: bool,
    #[arg(long)]
    pub starts_on: Option<String>,
    #[arg(long, conflicts_with = "clear_ends_on")]
    pub ends_on: Option<String>,
    /// Make the plan open-ended
    #[arg(long)]
    pub clear_ends_on: bool,
    #[arg(long)]
    pub price_cents: Option<i64>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub tax_pct: Option<f64>,
    #[arg(long)]
    pub discount_pct: Option<f64>,
    #[arg(long)]
    pub billing_type: Option<String>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        let (window_start, window_end) = split_window(val.window);
        UpdatePlan {
            id: val.id,
            pool_id: val.pool_id,
            frequency: val.frequency,
            dow: val.dow,
            second_dow: val.second_dow,
            dom: val.dom,
            second_dom: val.second_dom,
            window_start,
            window_end,
            clear_window: val.clear_window,
            starts_on: val.starts_on,
            ends_on: val.ends_on,
            clear_ends_on: val.clear_ends_on,
            price_cents: val.price_cents,
            currency: val.currency,
            tax_pct: val.tax_pct,
            discount_pct: val.discount_pct,
            billing_type: val.billing_type,
        }
    }
}

/// Delete a plan permanently, with its overrides and pause
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Update a plan
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Delete a plan permanently
    Delete(DeletePlanArgs),
}

/// Set the window for one date, replacing any existing override
#[derive(Args)]
pub struct AddOverrideArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// Date of the visit (YYYY-MM-DD)
    pub date: String,
    /// Window for that date as HH:MM-HH:MM
    pub window: String,
    /// Why the window differs
    #[arg(short, long)]
    pub reason: Option<String>,
}

impl From<AddOverrideArgs> for AddOverride {
    fn from(val: AddOverrideArgs) -> Self {
        let (window_start, window_end) = split_window(Some(val.window));
        AddOverride {
            plan_id: val.plan_id,
            date: val.date,
            window_start: window_start.unwrap_or_default(),
            window_end: window_end.unwrap_or_default(),
            reason: val.reason,
        }
    }
}

/// Remove the override for one date
#[derive(Args)]
pub struct RemoveOverrideArgs {
    pub plan_id: u64,
    /// Date of the override (YYYY-MM-DD)
    pub date: String,
}

impl From<RemoveOverrideArgs> for RemoveOverride {
    fn from(val: RemoveOverrideArgs) -> Self {
        RemoveOverride {
            plan_id: val.plan_id,
            date: val.date,
        }
    }
}

/// List a plan's overrides
#[derive(Args)]
pub struct ListOverridesArgs {
    pub plan_id: u64,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum OverrideCommands {
    /// Set the window for one date
    #[command(alias = "a")]
    Add(AddOverrideArgs),
    /// Remove the override for one date
    #[command(alias = "rm")]
    Remove(RemoveOverrideArgs),
    /// List a plan's overrides
    #[command(aliases = ["l", "ls"])]
    List(ListOverridesArgs),
}

#[derive(Args)]
pub struct PausePlanArgs {
    /// ID of the plan to pause
    pub plan_id: u64,
    /// First paused day (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub from: Option<String>,
    /// Last paused day (YYYY-MM-DD); paused indefinitely when omitted
    #[arg(long)]
    pub until: Option<String>,
    #[arg(short, long)]
    pub reason: Option<String>,
}

impl From<PausePlanArgs> for PausePlan {
    fn from(val: PausePlanArgs) -> Self {
        PausePlan {
            plan_id: val.plan_id,
            starts_on: val.from,
            until: val.until,
            reason: val.reason,
        }
    }
}

#[derive(Args)]
pub struct ResumePlanArgs {
    /// ID of the plan to resume
    pub plan_id: u64,
}

impl From<ResumePlanArgs> for Id {
    fn from(val: ResumePlanArgs) -> Self {
        Id { id: val.plan_id }
    }
}

#[derive(Args)]
pub struct ScheduleArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,
    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ScheduleArgs> for Schedule {
    fn from(val: &ScheduleArgs) -> Self {
        Schedule {
            plan_id: val.plan_id,
            from: val.from.clone(),
            to: val.to.clone(),
        }
    }
}

#[derive(Args)]
pub struct ExpandArgs {
    /// JSON file holding {"plan": {...}, "overrides": [...], "pause": {...}}
    #[arg(long)]
    pub file: PathBuf,
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,
    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,
    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}
