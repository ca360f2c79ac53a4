//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// No `project_info.json` where a generation command expects one.
    #[error("No project_info.json found at {path}")]
    ProjectInfoMissing { path: PathBuf },

    /// `project_info.json` exists but cannot be used.
    #[error("Cannot read project info at {path}: {reason}")]
    ProjectInfoUnreadable { path: PathBuf, reason: String },

    /// Definition input file does not exist.
    #[error("Definition file not found: {path}")]
    DefinitionFileMissing { path: PathBuf },

    /// Remote configuration could not be fetched or decoded.
    #[error("Configuration source failed: {reason}")]
    Configuration { reason: String },

    /// API description could not be loaded.
    #[error("Schema source failed: {reason}")]
    SchemaSource { reason: String },

    /// A build descriptor could not be opened or saved.
    #[error("Could not update build descriptor {path}")]
    DescriptorUpdate { path: PathBuf },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
            ],
            Self::ProjectInfoMissing { .. } => vec![
                "Run generation commands from the project root".into(),
                "Create a project first: hexaforge create-project <name>".into(),
            ],
            Self::ProjectInfoUnreadable { .. } => vec![
                "project_info.json is written by create-project and should not be edited".into(),
            ],
            Self::DefinitionFileMissing { path } => vec![
                format!("Check the path: {}", path.display()),
                "Definition files are JSON objects keyed by artifact name".into(),
            ],
            Self::Configuration { .. } => vec![
                "Check remote.config_url or remote.config_file in your config".into(),
                "Set HEXAFORGE_REMOTE__CONFIG_FILE to work offline".into(),
            ],
            Self::SchemaSource { .. } => vec![
                "The API description must be an OpenAPI document in JSON or YAML".into(),
            ],
            Self::DescriptorUpdate { path } => vec![
                format!("Check that {} exists and is well formed", path.display()),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::DescriptorUpdate { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::ProjectInfoMissing { .. } | Self::DefinitionFileMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::ProjectInfoUnreadable { .. } | Self::SchemaSource { .. } => {
                ErrorCategory::Validation
            }
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}
