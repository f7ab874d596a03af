//! Pause period queries. A plan has at most one pause.

use rusqlite::{params, OptionalExtension};

use super::{parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::PausePeriod,
};

const UPSERT_PAUSE_SQL: &str = "INSERT INTO plan_pauses (plan_id, starts_on, until, reason) \
     VALUES (?1, ?2, ?3, ?4) ON CONFLICT(plan_id) DO UPDATE SET \
     starts_on = excluded.starts_on, until = excluded.until, reason = excluded.reason";
const SELECT_PAUSE_SQL: &str =
    "SELECT starts_on, until, reason FROM plan_pauses WHERE plan_id = ?1";
const DELETE_PAUSE_SQL: &str = "DELETE FROM plan_pauses WHERE plan_id = ?1";

impl super::Database {
    /// Sets the plan's pause, replacing any existing one.
    pub fn set_pause(&mut self, plan_id: u64, pause: &PausePeriod) -> Result<()> {
        self.connection
            .execute(
                UPSERT_PAUSE_SQL,
                params![
                    plan_id as i64,
                    pause.starts_on.to_string(),
                    pause.until.map(|d| d.to_string()),
                    pause.reason,
                ],
            )
            .db_context("Failed to store pause")?;
        Ok(())
    }

    pub fn get_pause(&self, plan_id: u64) -> Result<Option<PausePeriod>> {
        self.connection
            .query_row(SELECT_PAUSE_SQL, params![plan_id as i64], |row| {
                Ok(PausePeriod {
                    starts_on: parse_column(row, 0)?,
                    until: parse_optional_column(row, 1)?,
                    reason: row.get(2)?,
                })
            })
            .optional()
            .db_context("Failed to query pause")
    }

    /// Clears the plan's pause. Returns false when it was not paused.
    pub fn clear_pause(&mut self, plan_id: u64) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_PAUSE_SQL, params![plan_id as i64])
            .db_context("Failed to clear pause")?;
        Ok(rows > 0)
    }
}
