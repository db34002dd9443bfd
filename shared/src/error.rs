//! Unified error type for the ordering engine
//!
//! Every fallible operation that crosses a component boundary returns
//! [`AppError`]. Layers with richer failure detail (storage, bill export)
//! keep their own error enums and convert at the boundary.
//!
//! Nothing in this system is fatal to the process: every variant maps to
//! either a user-facing message or a degraded view state.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected input, no state was mutated
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Underlying storage failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    // ========== Convenient constructors ==========

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // ========== Error inspection methods ==========

    /// Whether this is a not-found error (recoverable by starting over)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is a validation rejection (no state was mutated)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Result type for engine operations
pub type AppResult<T> = Result<T, AppError>;
