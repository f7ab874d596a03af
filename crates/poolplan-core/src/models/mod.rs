//! Data models for service plans and their schedules.
//!
//! This module contains the domain types the recurrence engine consumes and
//! produces. Every model derives serde so the same shapes travel through
//! storage, JSON output and plan files.
//!
//! - [`ServicePlan`]: frequency, anchors, default window, date bounds and
//!   [`BillingTerms`]
//! - [`WindowOverride`]: a replacement window for one date
//! - [`PausePeriod`]: an interval with no visits
//! - [`Occurrence`]: one derived visit
//!
//! Display implementations live in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use poolplan_core::models::{DayOfMonth, DayOfWeek, Frequency, TimeWindow};
//!
//! let frequency: Frequency = "twice_week".parse().unwrap();
//! assert!(frequency.needs_second_anchor());
//!
//! let dow: DayOfWeek = "thu".parse().unwrap();
//! assert_eq!(dow.to_string(), "thu");
//!
//! assert!(DayOfMonth::new(-1).unwrap().is_last());
//! assert!(DayOfMonth::new(31).is_err());
//!
//! let window = TimeWindow::parse("09:00", "11:00").unwrap();
//! assert_eq!(window.to_string(), "09:00-11:00");
//! ```

mod anchor;
mod billing;
mod frequency;
mod occurrence;
mod overrides;
mod plan;
mod window;


pub use anchor::{DayOfMonth, DayOfWeek};
pub use billing::{BillingTerms, BillingType};
pub use frequency::{Frequency, FrequencyFamily};
pub use occurrence::Occurrence;
pub use overrides::{PausePeriod, WindowOverride};
pub use plan::ServicePlan;
pub use window::{parse_hhmm, TimeWindow};
