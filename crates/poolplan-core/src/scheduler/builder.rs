//! Builder for creating and configuring Scheduler instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Scheduler;
use crate::{
    db::Database,
    error::{PlanError, Result},
};

/// Builder for creating and configuring Scheduler instances.
#[derive(Debug, Clone)]
pub struct SchedulerBuilder {
    database_path: Option<PathBuf>,
}

impl SchedulerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/poolplan/poolplan.db` or
    /// `~/.local/share/poolplan/poolplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Opens the database and builds the scheduler.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::XdgDirectory` if no default location can be found,
    /// `PlanError::FileSystem` if the parent directory cannot be created and
    /// `PlanError::Database` if opening or initializing the database fails.
    pub async fn build(self) -> Result<Scheduler> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlanError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let open_path = db_path.clone();
        let db = task::spawn_blocking(move || Database::new(&open_path))
            .await
            .map_err(|e| PlanError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        log::info!("Opened schedule database at {}", db_path.display());
        Ok(Scheduler::new(db, db_path))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("poolplan")
            .place_data_file("poolplan.db")
            .map_err(|e| PlanError::XdgDirectory(e.to_string()))
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
