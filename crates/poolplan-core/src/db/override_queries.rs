//! Window override queries.

use jiff::civil::Date;
use rusqlite::{params, Row};

use super::{conversion_error, parse_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{TimeWindow, WindowOverride},
};

const UPSERT_OVERRIDE_SQL: &str = "INSERT INTO window_overrides \
     (plan_id, date, window_start, window_end, reason) VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(plan_id, date) DO UPDATE SET window_start = excluded.window_start, \
     window_end = excluded.window_end, reason = excluded.reason";
const DELETE_OVERRIDE_SQL: &str = "DELETE FROM window_overrides WHERE plan_id = ?1 AND date = ?2";
const SELECT_OVERRIDES_SQL: &str = "SELECT date, window_start, window_end, reason \
     FROM window_overrides WHERE plan_id = ?1 ORDER BY date";
const SELECT_OVERRIDES_BETWEEN_SQL: &str = "SELECT date, window_start, window_end, reason \
     FROM window_overrides WHERE plan_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date";

impl super::Database {
    /// Stores an override, replacing any existing one for the same date.
    ///
    /// Returns true when an earlier override was replaced.
    pub fn upsert_override(&mut self, plan_id: u64, entry: &WindowOverride) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let date = entry.date.to_string();
        let replaced: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM window_overrides WHERE plan_id = ?1 AND date = ?2)",
                params![plan_id as i64, &date],
                |row| row.get(0),
            )
            .db_context("Failed to check existing override")?;

        let window = entry.window.to_string();
        let (start, end) = window.split_once('-').unwrap_or((window.as_str(), ""));
        tx.execute(
            UPSERT_OVERRIDE_SQL,
            params![plan_id as i64, &date, start, end, entry.reason],
        )
        .db_context("Failed to store window override")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(replaced)
    }

    /// Removes the override for `date`. Returns false when none existed.
    pub fn remove_override(&mut self, plan_id: u64, date: Date) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_OVERRIDE_SQL, params![plan_id as i64, date.to_string()])
            .db_context("Failed to delete window override")?;
        Ok(rows > 0)
    }

    /// Lists a plan's overrides in date order, optionally limited to an
    /// inclusive date range.
    pub fn list_overrides(
        &self,
        plan_id: u64,
        range: Option<(Date, Date)>,
    ) -> Result<Vec<WindowOverride>> {
        let overrides = match range {
            Some((from, to)) => {
                let mut stmt = self
                    .connection
                    .prepare(SELECT_OVERRIDES_BETWEEN_SQL)
                    .db_context("Failed to prepare query")?;
                let rows = stmt
                    .query_map(
                        params![plan_id as i64, from.to_string(), to.to_string()],
                        row_to_override,
                    )
                    .db_context("Failed to query window overrides")?;
                rows.collect::<std::result::Result<Vec<_>, _>>()
            }
            None => {
                let mut stmt = self
                    .connection
                    .prepare(SELECT_OVERRIDES_SQL)
                    .db_context("Failed to prepare query")?;
                let rows = stmt
                    .query_map(params![plan_id as i64], row_to_override)
                    .db_context("Failed to query window overrides")?;
                rows.collect::<std::result::Result<Vec<_>, _>>()
            }
        };
        overrides.db_context("Failed to read window override rows")
    }
}

fn row_to_override(row: &Row<'_>) -> rusqlite::Result<WindowOverride> {
    let start: String = row.get(1)?;
    let end: String = row.get(2)?;
    Ok(WindowOverride {
        date: parse_column(row, 0)?,
        window: TimeWindow::parse(&start, &end).map_err(|e| conversion_error(1, e.to_string()))?,
        reason: row.get(3)?,
    })
}
