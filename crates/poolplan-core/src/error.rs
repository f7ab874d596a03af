//! Error types for the scheduling library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all plan, storage and recurrence operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Frequency value outside the supported set
    #[error("Invalid frequency '{value}': expected one of weekly, biweekly, monthly, once_week, twice_week, once_month, twice_month")]
    InvalidFrequency { value: String },
    /// A day-of-week or day-of-month anchor required by the frequency is absent
    #[error("Missing anchor '{field}' required by the plan frequency")]
    MissingAnchor { field: String },
    /// An anchor is present but out of range or inconsistent
    #[error("Invalid anchor '{field}': {reason}")]
    InvalidAnchor { field: String, reason: String },
    /// Malformed or empty time-of-day window
    #[error("Invalid time window: {reason}")]
    InvalidWindow { reason: String },
    /// A calendar date that could not be parsed
    #[error("Invalid date for field '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Service plan not found for the given ID
    #[error("Service plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration and runtime plumbing errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with a message.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlanError {
        PlanError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub fn missing_anchor(field: impl Into<String>) -> Self {
        Self::MissingAnchor {
            field: field.into(),
        }
    }

    pub fn invalid_anchor(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAnchor {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanError::database(message).with_source(e))
    }
}

/// Result type alias for scheduling operations
pub type Result<T> = std::result::Result<T, PlanError>;
