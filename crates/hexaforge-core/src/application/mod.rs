//! Application layer for hexaforge.
//!
//! This layer contains:
//! - **Services**: one entry point per command (ProjectService, GenerationService)
//! - **Generators**: definitions in, source artifacts out
//! - **Assemblers**: module descriptors and directory skeletons
//! - **Builders**: source and descriptor rendering
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Nothing here touches the filesystem or network directly; every effect
//! goes through a port.

pub mod assemblers;
pub mod builders;
pub mod configuration;
pub mod error;
pub mod generators;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main services
pub use services::{
    CreateProjectRequest, GenerationService, ProjectCreated, ProjectService, load_project_info,
};

pub use configuration::ConfigurationProvider;
pub use generators::{GenerationIssue, GenerationReport};

// Re-export port traits (for adapter implementation)
pub use ports::{ConfigSource, DocumentStore, FileSink, SchemaSource};

pub use error::ApplicationError;
