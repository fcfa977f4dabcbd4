//! Custom error types for pocket-ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input rejected before any mutation took place
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors (durable write failed, lock poisoned, corrupt file)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error comes from the persistence layer
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Json(_))
    }

    /// Describe the failure in terms of the action the user attempted,
    /// e.g. `user_message("save expense")` -> "Could not save expense: ..."
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Validation(reason) => format!("Could not {}: {}", action, reason),
            Self::NotFound { entity_type, .. } => {
                format!("Could not {}: {} no longer exists", action, entity_type.to_lowercase())
            }
            _ => format!("Could not {}. Please try again.", action),
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for LedgerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Storage(format!("Lock poisoned: {}", err))
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::expense_not_found("exp-42");
        assert_eq!(err.to_string(), "Expense not found: exp-42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
        assert!(ledger_err.is_persistence());
    }

    #[test]
    fn test_user_message_mentions_action() {
        let err = LedgerError::Validation("amount must not be negative".into());
        assert_eq!(
            err.user_message("save expense"),
            "Could not save expense: amount must not be negative"
        );

        let err = LedgerError::expense_not_found("exp-7");
        assert_eq!(
            err.user_message("delete expense"),
            "Could not delete expense: expense no longer exists"
        );

        let err = LedgerError::Storage("disk full".into());
        assert_eq!(
            err.user_message("save budget"),
            "Could not save budget. Please try again."
        );
    }
}
