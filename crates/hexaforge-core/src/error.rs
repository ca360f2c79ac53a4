//! Unified error handling for hexaforge core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for hexaforge core operations.
#[derive(Debug, Error, Clone)]
pub enum HexaforgeError {
    /// Errors from the domain layer (business rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HexaforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in hexaforge".into(),
                "Please report this issue at: https://github.com/cosecruz/hexaforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Shorthand for [`ApplicationError::FilesystemError`].
    pub fn filesystem(path: impl Into<std::path::PathBuf>, reason: impl ToString) -> Self {
        Self::Application(ApplicationError::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        })
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HexaforgeResult<T> = Result<T, HexaforgeError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> HexaforgeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> HexaforgeResult<T> {
        self.map_err(|e| HexaforgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn categories_flow_through_layers() {
        let err: HexaforgeError = DomainError::MissingPrimaryKey {
            entity: "Customer".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err: HexaforgeError = ApplicationError::ProjectInfoMissing {
            path: PathBuf::from("/tmp/x"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u8, _> = "x".parse::<u8>();
        let err = parsed.context("parsing port").unwrap_err();
        assert!(err.to_string().contains("parsing port"));
    }
}
