//! Error types for donation-inventory.
//!
//! This module defines all error types used throughout the crate, separating
//! recoverable form failures from storage and configuration problems.

use std::path::PathBuf;
use thiserror::Error;

use crate::form::ValidationError;

/// The main error type for donation-inventory operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Form Errors ===
    /// The form buffer failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Store Errors ===
    /// No donation with the given id exists.
    #[error("donation not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// Writing the donation list to its persistence slot failed.
    ///
    /// The in-memory list still holds the mutation that triggered the write.
    #[error("failed to persist donations to slot '{key}': {source}")]
    PersistenceFailure {
        /// The slot key being written.
        key: String,
        /// The underlying backend error.
        #[source]
        source: Box<Error>,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The slot database layout could not be set up or is unsupported.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for donation-inventory operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Wrap a backend error as a persistence failure for the given slot.
    #[must_use]
    pub fn persistence_failure(key: impl Into<String>, source: Error) -> Self {
        Self::PersistenceFailure {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error means the target donation no longer exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a form validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is a failed write to the persistence slot.
    #[must_use]
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::PersistenceFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("abc-123");
        assert_eq!(err.to_string(), "donation not found: abc-123");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_from_form_error() {
        let err: Error = ValidationError::MissingDonor.into();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("missing or invalid field"));
    }

    #[test]
    fn test_persistence_failure_display() {
        let backend_err = Error::DatabaseMigration {
            message: "quota exceeded".to_string(),
        };
        let err = Error::persistence_failure("donations.v1", backend_err);
        let msg = err.to_string();
        assert!(msg.contains("donations.v1"));
        assert!(msg.contains("quota exceeded"));
        assert!(err.is_persistence_failure());
    }

    #[test]
    fn test_persistence_failure_source() {
        use std::error::Error as _;

        let err = Error::persistence_failure("slot", Error::not_found("abc"));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("donation not found: abc"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "slot_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("slot_key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
