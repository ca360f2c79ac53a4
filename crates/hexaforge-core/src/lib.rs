//! Hexaforge Core - generation engine for hexagonal Maven projects
//!
//! This crate provides the domain and application layers of the generator:
//! project layout, definition files, source builders and the services
//! behind every CLI command.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          hexaforge-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectService, GenerationService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │  Generators / Assemblers / Builders     │
//! └──────────────────┬──────────────────────┘
//!                    │ writes through
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FileSink, DocumentStore, ConfigSource, │
//! │  SchemaSource)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    hexaforge-adapters (Infrastructure)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hexaforge_core::prelude::*;
//!
//! # fn run(sink: Box<dyn FileSink>, store: Box<dyn DocumentStore>) -> HexaforgeResult<()> {
//! let service = ProjectService::new(sink, store, ConfigurationProvider::offline());
//! let request = CreateProjectRequest::new("shop", "/work").archetype(Archetype::Hexa);
//! let created = service.create_project(&request)?;
//! println!("{} files written", created.report.written.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ConfigurationProvider, CreateProjectRequest, GenerationReport,
        GenerationService, ProjectCreated, ProjectService, load_project_info,
        ports::{ConfigSource, DocumentStore, FileSink, SchemaSource},
    };
    pub use crate::domain::{
        Archetype, DefinitionSet, Document, DomainError, ProjectInfo, RemoteConfig, Server,
    };
    pub use crate::error::{Context, HexaforgeError, HexaforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
