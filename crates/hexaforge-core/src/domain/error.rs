// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports collect them per artifact)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Definition Errors
    // ========================================================================
    #[error("Entity '{entity}' has no primary key field")]
    MissingPrimaryKey { entity: String },

    #[error("Entity '{entity}' declares {count} primary key fields, exactly one is required")]
    MultiplePrimaryKeys { entity: String, count: usize },

    #[error("Invalid definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("Invalid definition file: {0}")]
    InvalidDefinitionFile(String),

    // ========================================================================
    // Document Errors
    // ========================================================================
    #[error("Cannot create document: {reason}")]
    DocumentCreation { reason: String },

    // ========================================================================
    // Project Errors
    // ========================================================================
    #[error("Invalid project info: {0}")]
    InvalidProjectInfo(String),

    #[error("Unknown archetype '{0}'")]
    UnknownArchetype(String),

    #[error("Unknown server '{0}'")]
    UnknownServer(String),

    #[error("No database descriptor for '{kind}'")]
    UnknownDatabase { kind: String, available: Vec<String> },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPrimaryKey { entity } => vec![
                format!("Mark one field of '{entity}' as the key:"),
                r#"  "id": { "type": "Long", "primaryKey": true }"#.into(),
            ],
            Self::MultiplePrimaryKeys { entity, .. } => vec![format!(
                "Keep \"primaryKey\": true on a single field of '{entity}'"
            )],
            Self::InvalidDefinition { name, .. } => vec![
                format!("Check the JSON object for '{name}'"),
                "Field values are either a type name or an object with a \"type\" key".into(),
            ],
            Self::InvalidDefinitionFile(_) => vec![
                "The definition file must be a JSON object keyed by artifact name".into(),
            ],
            Self::InvalidProjectInfo(_) => vec![
                "project_info.json looks corrupted".into(),
                "Re-create the project with: hexaforge create-project <name>".into(),
            ],
            Self::UnknownArchetype(_) => {
                vec!["Supported archetypes: HEXA, MVC, JSF, REST".into()]
            }
            Self::UnknownServer(_) => vec!["Supported servers: tomcat, jetty, undertow".into()],
            Self::UnknownDatabase { available, .. } => {
                if available.is_empty() {
                    vec!["The remote configuration lists no databases".into()]
                } else {
                    vec![format!("Available databases: {}", available.join(", "))]
                }
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPrimaryKey { .. }
            | Self::MultiplePrimaryKeys { .. }
            | Self::InvalidDefinition { .. }
            | Self::InvalidDefinitionFile(_)
            | Self::UnknownArchetype(_)
            | Self::UnknownServer(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::UnknownDatabase { .. } => ErrorCategory::NotFound,
            Self::InvalidProjectInfo(_) | Self::DocumentCreation { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
