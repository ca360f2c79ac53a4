//! Infrastructure adapters for hexaforge.
//!
//! This crate implements the ports defined in `hexaforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod config;
pub mod filesystem;
pub mod openapi;
pub mod xml;

// Re-export commonly used adapters
pub use config::{FileConfigSource, HttpConfigSource};
pub use filesystem::{LocalFileSink, MemoryFileSink};
pub use openapi::OpenApiSchemaSource;
pub use xml::XmlDocumentStore;
