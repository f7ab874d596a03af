//! High-level scheduling API over stored plans.
//!
//! [`Scheduler`] coordinates validation, storage and expansion. It owns one
//! SQLite connection behind a mutex and runs every storage call on tokio's
//! blocking pool, so async callers never block a worker thread on disk I/O.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Params      │    │    Scheduler    │    │    Database     │
//! │  (validated)    │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │                 │    │  override_ops)  │    │                 │
//! └─────────────────┘    └────────┬────────┘    └─────────────────┘
//!                                 │ schedule_ops
//!                                 ▼
//!                        recurrence::expand ──▶ billing::invoice_batches
//! ```
//!
//! # Examples
//!
//! ```rust
//! use poolplan_core::{params::{CreatePlan, Schedule}, SchedulerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("poolplan.db"))
//!     .build()
//!     .await?;
//!
//! let plan = scheduler
//!     .create_plan(&CreatePlan {
//!         pool_id: "pool-1".to_string(),
//!         frequency: "weekly".to_string(),
//!         dow: Some("mon".to_string()),
//!         starts_on: Some("2024-01-01".to_string()),
//!         ..CreatePlan::default()
//!     })
//!     .await?;
//!
//! let schedule = scheduler
//!     .schedule(&Schedule {
//!         plan_id: plan.id,
//!         from: "2024-01-01".to_string(),
//!         to: "2024-01-31".to_string(),
//!     })
//!     .await?;
//! assert_eq!(schedule.occurrences.len(), 5);
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use jiff::{civil::Date, Zoned};
use tokio::task;

use crate::{
    db::Database,
    error::{PlanError, Result},
};

pub mod builder;
pub mod override_ops;
pub mod plan_ops;
pub mod schedule_ops;


pub use builder::SchedulerBuilder;
pub use schedule_ops::{PlanInvoices, PlanSchedule};

/// Main scheduler interface for managing plans and their schedules.
#[derive(Clone)]
pub struct Scheduler {
    db: Arc<Mutex<Database>>,
    db_path: PathBuf,
}

impl Scheduler {
    pub(crate) fn new(db: Database, db_path: PathBuf) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            db_path,
        }
    }

    /// Location of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against the database on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || {
            let mut guard = db.lock().map_err(|_| PlanError::Configuration {
                message: "Database lock poisoned".to_string(),
            })?;
            op(&mut guard)
        })
        .await
        .map_err(|e| PlanError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Today's date in the system time zone.
pub(crate) fn today() -> Date {
    Zoned::now().date()
}
