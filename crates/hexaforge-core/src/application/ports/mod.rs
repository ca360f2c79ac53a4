//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hexaforge-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileSink`: artifact and directory persistence
//!   - `DocumentStore`: markup document load/save
//!   - `ConfigSource`: remote configuration payload
//!   - `SchemaSource`: parsed API description
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ConfigSource, DocumentStore, FileSink, SchemaSource};

#[cfg(test)]
pub use output::MockConfigSource;
