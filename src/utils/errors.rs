//! Error handling for DormHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the DormHub application
#[derive(Error, Debug)]
pub enum DormHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Resident not found: {resident_id}")]
    ResidentNotFound { resident_id: i64 },

    #[error("Checkout form not found: {form_id}")]
    FormNotFound { form_id: i64 },

    #[error("Clearance item not found: {item_id}")]
    ClearanceItemNotFound { item_id: i64 },

    #[error("Student ID already exists: {student_id}")]
    DuplicateStudentId { student_id: String },

    #[error("Resident {resident_id} has checkout forms and cannot be deleted")]
    ResidentHasForms { resident_id: i64 },

    #[error("Checkout form {form_id} with status {status} cannot be deleted")]
    FormNotDeletable { form_id: i64, status: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for DormHub operations
pub type Result<T> = std::result::Result<T, DormHubError>;

impl DormHubError {
    /// Check if the error is recoverable at the request boundary
    pub fn is_recoverable(&self) -> bool {
        match self {
            DormHubError::Database(_) => false,
            DormHubError::Migration(_) => false,
            DormHubError::Config(_) => false,
            DormHubError::Validation(_) => true,
            DormHubError::InvalidStatusTransition { .. } => true,
            DormHubError::ResidentNotFound { .. } => true,
            DormHubError::FormNotFound { .. } => true,
            DormHubError::ClearanceItemNotFound { .. } => true,
            DormHubError::DuplicateStudentId { .. } => true,
            DormHubError::ResidentHasForms { .. } => true,
            DormHubError::FormNotDeletable { .. } => true,
            DormHubError::Serialization(_) => false,
            DormHubError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DormHubError::Database(_) => ErrorSeverity::Critical,
            DormHubError::Migration(_) => ErrorSeverity::Critical,
            DormHubError::Config(_) => ErrorSeverity::Critical,
            DormHubError::Validation(_) => ErrorSeverity::Info,
            DormHubError::InvalidStatusTransition { .. } => ErrorSeverity::Warning,
            DormHubError::DuplicateStudentId { .. } => ErrorSeverity::Warning,
            DormHubError::ResidentHasForms { .. } => ErrorSeverity::Warning,
            DormHubError::FormNotDeletable { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
