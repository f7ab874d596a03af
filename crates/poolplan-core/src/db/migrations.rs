//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first schema version, with their definitions.
const ADDED_PLAN_COLUMNS: [(&str, &str); 3] = [
    ("second_dow", "TEXT"),
    ("second_dom", "INTEGER"),
    ("cycle_anchor", "TEXT"),
];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Foreign keys are off by default in SQLite; overrides and pauses
        // rely on cascading deletes.
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Brings databases created by older releases up to the current columns.
    fn apply_migrations(&self) -> Result<()> {
        for (column, definition) in ADDED_PLAN_COLUMNS {
            let exists: bool = self
                .connection
                .query_row(
                    "SELECT COUNT(*) FROM pragma_table_info('service_plans') WHERE name = ?1",
                    [column],
                    |row| row.get::<_, i64>(0),
                )
                .map(|count| count > 0)
                .db_context("Failed to inspect service_plans columns")?;

            if !exists {
                log::info!("Adding column service_plans.{column}");
                self.connection
                    .execute(
                        &format!("ALTER TABLE service_plans ADD COLUMN {column} {definition}"),
                        [],
                    )
                    .db_context("Failed to migrate service_plans table")?;
            }
        }

        Ok(())
    }
}
