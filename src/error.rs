//! Custom error types for fintrack
//!
//! The aggregation core never fails; these errors come from the layers around
//! it: configuration, snapshot storage, record validation and export.

use thiserror::Error;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for incoming records and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Snapshot storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanceError {
    /// Create a "not found" error for snapshot files
    pub fn snapshot_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Snapshot",
            identifier: identifier.into(),
        }
    }

    /// Create a validation error for a single record field
    pub fn invalid_field(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{}: {}", field, reason))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FinanceResult<T> = Result<T, FinanceError>;
