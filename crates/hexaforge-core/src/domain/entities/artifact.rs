use std::path::PathBuf;

use crate::domain::{
    text::package_segments,
    value_objects::{SOURCE_LANGUAGE, SourceSet},
};

/// Logical write target of a generated source unit.
///
/// Resolves to `module_path/src/<set>/java/<package path>/<file_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub module_path: PathBuf,
    pub source_set: SourceSet,
    pub package: String,
    pub file_name: String,
}

impl ArtifactLocation {
    /// Directory the file lands in.
    pub fn directory(&self) -> PathBuf {
        let mut dir = self
            .module_path
            .join("src")
            .join(self.source_set.as_str())
            .join(SOURCE_LANGUAGE);
        for segment in package_segments(&self.package) {
            dir.push(segment);
        }
        dir
    }

    pub fn path(&self) -> PathBuf {
        self.directory().join(&self.file_name)
    }
}

/// One generated file: an ordered line buffer plus where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub location: ArtifactLocation,
    pub lines: Vec<String>,
}

impl GeneratedArtifact {
    /// File content, newline terminated.
    pub fn content(&self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}
