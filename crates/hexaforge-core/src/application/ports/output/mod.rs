//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hexaforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Document, GeneratedArtifact, PathGroup, RemoteConfig, SchemaDef};
use crate::error::HexaforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hexaforge_adapters::filesystem::LocalFileSink` (production)
/// - `hexaforge_adapters::filesystem::MemoryFileSink` (testing)
///
/// Writes overwrite silently; parent directories are the caller's concern
/// except in [`FileSink::write_artifact`].
pub trait FileSink: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HexaforgeResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> HexaforgeResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> HexaforgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Persist a generated artifact at its resolved location, creating
    /// intermediate directories.
    fn write_artifact(&self, artifact: &GeneratedArtifact) -> HexaforgeResult<PathBuf> {
        let path = artifact.location.path();
        self.create_dir_all(&artifact.location.directory())?;
        self.write_file(&path, &artifact.content())?;
        Ok(path)
    }
}

/// Port for markup document persistence.
///
/// Implemented by `hexaforge_adapters::xml::XmlDocumentStore`.
pub trait DocumentStore: Send + Sync {
    /// Load and parse `path`. Missing or malformed files yield `None`.
    fn open(&self, path: &Path) -> Option<Document>;

    /// Serialise `document` to `path`, replacing any previous content.
    fn save(&self, path: &Path, document: &Document) -> HexaforgeResult<()>;
}

/// Port for the remote configuration payload.
///
/// Implemented by:
/// - `hexaforge_adapters::config::HttpConfigSource` (blocking GET)
/// - `hexaforge_adapters::config::FileConfigSource` (local JSON file)
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSource: Send + Sync {
    fn fetch(&self) -> HexaforgeResult<RemoteConfig>;
}

/// Port for an already parsed API description.
///
/// Implemented by `hexaforge_adapters::openapi::OpenApiSchemaSource`.
pub trait SchemaSource: Send + Sync {
    /// Component schemas, in document order.
    fn schemas(&self) -> Vec<SchemaDef>;

    /// Operations grouped by first path segment, in document order.
    fn path_groups(&self) -> Vec<PathGroup>;
}
