//! Service plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::{conversion_error, parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    models::{BillingTerms, DayOfMonth, ServicePlan, TimeWindow},
    params::PlanDraft,
};

const PLAN_COLUMNS: &str = "id, pool_id, frequency, dow, second_dow, dom, second_dom, \
     window_start, window_end, starts_on, ends_on, cycle_anchor, price_cents, currency, \
     tax_pct, discount_pct, billing_type, created_at, updated_at";

const INSERT_PLAN_SQL: &str = "INSERT INTO service_plans (pool_id, frequency, dow, second_dow, \
     dom, second_dom, window_start, window_end, starts_on, ends_on, cycle_anchor, price_cents, \
     currency, tax_pct, discount_pct, billing_type, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)";
const UPDATE_PLAN_SQL: &str = "UPDATE service_plans SET pool_id = ?1, frequency = ?2, dow = ?3, \
     second_dow = ?4, dom = ?5, second_dom = ?6, window_start = ?7, window_end = ?8, \
     starts_on = ?9, ends_on = ?10, cycle_anchor = ?11, price_cents = ?12, currency = ?13, \
     tax_pct = ?14, discount_pct = ?15, billing_type = ?16, updated_at = ?17 WHERE id = ?18";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM service_plans WHERE id = ?1)";
const DELETE_PLAN_SQL: &str = "DELETE FROM service_plans WHERE id = ?1";

/// Column values shared by inserts and updates, in statement order.
struct PlanColumns {
    pool_id: String,
    frequency: &'static str,
    dow: Option<&'static str>,
    second_dow: Option<&'static str>,
    dom: Option<i32>,
    second_dom: Option<i32>,
    window_start: Option<String>,
    window_end: Option<String>,
    starts_on: Option<String>,
    ends_on: Option<String>,
    cycle_anchor: Option<String>,
    billing: BillingTerms,
}

impl From<&PlanDraft> for PlanColumns {
    fn from(draft: &PlanDraft) -> Self {
        let (window_start, window_end) = split_window(draft.window);
        PlanColumns {
            pool_id: draft.pool_id.clone(),
            frequency: draft.frequency.as_str(),
            dow: draft.dow.map(|d| d.as_str()),
            second_dow: draft.second_dow.map(|d| d.as_str()),
            dom: draft.dom.map(DayOfMonth::value),
            second_dom: draft.second_dom.map(DayOfMonth::value),
            window_start,
            window_end,
            starts_on: draft.starts_on.map(|d| d.to_string()),
            ends_on: draft.ends_on.map(|d| d.to_string()),
            cycle_anchor: draft.cycle_anchor.map(|d| d.to_string()),
            billing: draft.billing.clone(),
        }
    }
}

impl From<&ServicePlan> for PlanColumns {
    fn from(plan: &ServicePlan) -> Self {
        let (window_start, window_end) = split_window(plan.window);
        PlanColumns {
            pool_id: plan.pool_id.clone(),
            frequency: plan.frequency.as_str(),
            dow: plan.dow.map(|d| d.as_str()),
            second_dow: plan.second_dow.map(|d| d.as_str()),
            dom: plan.dom.map(DayOfMonth::value),
            second_dom: plan.second_dom.map(DayOfMonth::value),
            window_start,
            window_end,
            starts_on: plan.starts_on.map(|d| d.to_string()),
            ends_on: plan.ends_on.map(|d| d.to_string()),
            cycle_anchor: plan.cycle_anchor.map(|d| d.to_string()),
            billing: plan.billing.clone(),
        }
    }
}

fn split_window(window: Option<TimeWindow>) -> (Option<String>, Option<String>) {
    match window {
        Some(window) => {
            let text = window.to_string();
            match text.split_once('-') {
                Some((start, end)) => (Some(start.to_string()), Some(end.to_string())),
                None => (None, None),
            }
        }
        None => (None, None),
    }
}

impl super::Database {
    /// Stores a validated draft and returns the plan with its new ID.
    pub fn insert_plan(&mut self, draft: &PlanDraft) -> Result<ServicePlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let c = PlanColumns::from(draft);

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                c.pool_id,
                c.frequency,
                c.dow,
                c.second_dow,
                c.dom,
                c.second_dom,
                c.window_start,
                c.window_end,
                c.starts_on,
                c.ends_on,
                c.cycle_anchor,
                c.billing.price_cents,
                c.billing.currency,
                c.billing.tax_pct,
                c.billing.discount_pct,
                c.billing.billing_type.as_str(),
                &now_str,
                &now_str,
            ],
        )
        .db_context("Failed to insert service plan")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        log::debug!("Inserted service plan {id} for pool {}", draft.pool_id);
        Ok(draft.clone().into_plan(id, now))
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<ServicePlan>> {
        let query = format!("SELECT {PLAN_COLUMNS} FROM service_plans WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], row_to_plan)
            .optional()
            .db_context("Failed to query service plan")
    }

    /// Lists plans in ID order, optionally restricted to one pool.
    pub fn list_plans(&self, pool_id: Option<&str>) -> Result<Vec<ServicePlan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM service_plans");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(pool_id) = pool_id {
            query.push_str(" WHERE pool_id = ?");
            params_vec.push(Box::new(pool_id.to_string()));
        }
        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let plans = stmt
            .query_map(&params_refs[..], row_to_plan)
            .db_context("Failed to query service plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read service plan rows")?;

        Ok(plans)
    }

    /// Overwrites every stored field of `plan` except `created_at`.
    pub fn update_plan(&mut self, plan: &ServicePlan) -> Result<()> {
        let c = PlanColumns::from(plan);
        let rows = self
            .connection
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    c.pool_id,
                    c.frequency,
                    c.dow,
                    c.second_dow,
                    c.dom,
                    c.second_dom,
                    c.window_start,
                    c.window_end,
                    c.starts_on,
                    c.ends_on,
                    c.cycle_anchor,
                    c.billing.price_cents,
                    c.billing.currency,
                    c.billing.tax_pct,
                    c.billing.discount_pct,
                    c.billing.billing_type.as_str(),
                    plan.updated_at.to_string(),
                    plan.id as i64,
                ],
            )
            .db_context("Failed to update service plan")?;

        if rows == 0 {
            return Err(PlanError::PlanNotFound { id: plan.id });
        }
        Ok(())
    }

    /// Deletes a plan; its overrides and pause go with it.
    ///
    /// Returns false when no plan had the ID.
    pub fn delete_plan(&mut self, id: u64) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete service plan")?;
        Ok(rows > 0)
    }

    /// Checks whether a plan with the given ID exists.
    pub fn plan_exists(&self, id: u64) -> Result<bool> {
        self.connection
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")
    }
}

fn row_to_plan(row: &Row<'_>) -> rusqlite::Result<ServicePlan> {
    let window_start: Option<String> = row.get(7)?;
    let window_end: Option<String> = row.get(8)?;
    let window = match (window_start, window_end) {
        (Some(start), Some(end)) => Some(
            TimeWindow::parse(&start, &end).map_err(|e| conversion_error(7, e.to_string()))?,
        ),
        (None, None) => None,
        _ => return Err(conversion_error(7, "window stored without both ends".to_string())),
    };

    Ok(ServicePlan {
        id: row.get::<_, i64>(0)? as u64,
        pool_id: row.get(1)?,
        frequency: parse_column(row, 2)?,
        dow: parse_optional_column(row, 3)?,
        second_dow: parse_optional_column(row, 4)?,
        dom: read_dom(row, 5)?,
        second_dom: read_dom(row, 6)?,
        window,
        starts_on: parse_optional_column(row, 9)?,
        ends_on: parse_optional_column(row, 10)?,
        cycle_anchor: parse_optional_column(row, 11)?,
        billing: BillingTerms {
            price_cents: row.get(12)?,
            currency: row.get(13)?,
            tax_pct: row.get(14)?,
            discount_pct: row.get(15)?,
            billing_type: parse_column(row, 16)?,
        },
        created_at: parse_column(row, 17)?,
        updated_at: parse_column(row, 18)?,
    })
}

fn read_dom(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DayOfMonth>> {
    let value: Option<i32> = row.get(idx)?;
    value
        .map(|v| DayOfMonth::new(v).map_err(|e| conversion_error(idx, e.to_string())))
        .transpose()
}
