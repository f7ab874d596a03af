//! Display formatting for plans, schedules and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]),
//! while newtype wrappers format collections and operation outcomes. All
//! output is markdown so the CLI can render it richly or print it as-is.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (ServicePlan,   │───▶│ Result Types    │───▶│    Output       │
//! │  Occurrence)    │    │                 │    │  (Terminal)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: plan lists, schedules, invoices and overrides
//! - [`results`]: create, update and delete outcomes
//! - [`status`]: one-line success and failure messages
//! - [`datetime`]: timestamp and visit date formatting
//!
//! # Examples
//!
//! ```rust
//! use poolplan_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Resumed plan 3".to_string());
//! assert_eq!(status.to_string(), "Success: Resumed plan 3\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Invoices, Overrides, Plans, Visits};
pub use datetime::{LocalDateTime, VisitDate};
pub use models::Money;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
