//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{ServicePlan, WindowOverride};

/// Displays the outcome of a create operation followed by the new resource.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use poolplan_core::{
///     display::CreateResult,
///     models::{BillingTerms, DayOfMonth, Frequency, ServicePlan},
/// };
///
/// let plan = ServicePlan {
///     id: 1,
///     pool_id: "pool-1".to_string(),
///     frequency: Frequency::Monthly,
///     dow: None,
///     second_dow: None,
///     dom: Some(DayOfMonth::LAST),
///     second_dom: None,
///     window: None,
///     starts_on: None,
///     ends_on: None,
///     cycle_anchor: None,
///     billing: BillingTerms::default(),
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Created plan with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<ServicePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WindowOverride> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Set window override: {}", self.resource)
    }
}

/// Displays the outcome of an update, listing each change made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<ServicePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            writeln!(f, "No changes to plan with ID: {}", self.resource.id)?;
        } else {
            writeln!(f, "Updated plan with ID: {}", self.resource.id)?;
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<WindowOverride> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Replaced window override: {}", self.resource)
    }
}

/// Displays the outcome of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<ServicePlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan {} for pool '{}'",
            self.resource.id, self.resource.pool_id
        )
    }
}
