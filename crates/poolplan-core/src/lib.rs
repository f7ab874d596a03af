//! Core library for poolplan, a recurring pool-service scheduler.
//!
//! A [`ServicePlan`](models::ServicePlan) describes how often a pool is
//! serviced (weekly, every two weeks, monthly, or twice per week or month),
//! which weekday or day of the month anchors the visits, the default
//! time-of-day window and the billing terms. [`recurrence::expand`] turns a
//! plan, its per-date [`WindowOverride`](models::WindowOverride)s and an
//! optional [`PausePeriod`](models::PausePeriod) into concrete visit dates
//! for any date range.
//!
//! The crate is layered so the expansion stays a pure function:
//!
//! - [`models`]: plan, anchor, window, billing and occurrence types
//! - [`recurrence`]: expansion of plans into occurrences
//! - [`billing`]: grouping occurrences into invoice batches
//! - [`params`]: request shapes and their validation
//! - [`db`]: SQLite persistence
//! - [`scheduler`]: async API tying storage and expansion together
//! - [`display`]: markdown formatting for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use poolplan_core::{
//!     params::{CreatePlan, Schedule},
//!     SchedulerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("poolplan.db"))
//!     .build()
//!     .await?;
//!
//! let plan = scheduler
//!     .create_plan(&CreatePlan {
//!         pool_id: "backyard".to_string(),
//!         frequency: "monthly".to_string(),
//!         dom: Some(-1),
//!         starts_on: Some("2024-01-01".to_string()),
//!         ..CreatePlan::default()
//!     })
//!     .await?;
//!
//! let schedule = scheduler
//!     .schedule(&Schedule {
//!         plan_id: plan.id,
//!         from: "2024-01-01".to_string(),
//!         to: "2024-03-31".to_string(),
//!     })
//!     .await?;
//! for visit in &schedule.occurrences {
//!     println!("{visit}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod billing;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod recurrence;
pub mod scheduler;

pub use billing::{invoice_batches, InvoiceBatch};
pub use db::Database;
pub use display::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{PlanError, Result};
pub use models::{
    BillingTerms, BillingType, DayOfMonth, DayOfWeek, Frequency, Occurrence, PausePeriod,
    ServicePlan, TimeWindow, WindowOverride,
};
pub use params::{
    AddOverride, CreatePlan, DeletePlan, Id, ListPlans, PausePlan, PlanDraft, RemoveOverride,
    Schedule, UpdatePlan,
};
pub use recurrence::{expand, next_occurrence};
pub use scheduler::{PlanInvoices, PlanSchedule, Scheduler, SchedulerBuilder};
