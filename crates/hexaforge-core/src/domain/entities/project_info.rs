use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::artifact::ArtifactLocation,
    error::DomainError,
    text::package_segments,
    value_objects::{Archetype, Layer, ModuleKind, SOURCE_EXTENSION, SourceSet},
};

/// Persisted description of a generated project.
///
/// Written once by `create-project` as `project_info.json`; every later
/// generation command reads it and never mutates it. It is the single source
/// of truth for where generated files go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub archetype: Archetype,
    pub group_id: String,
    pub artifact_id: String,
    pub package: String,
    /// Absolute path of the domain module.
    pub domain: PathBuf,
    /// Absolute path of the application module.
    pub application: PathBuf,
    /// Absolute path of the infrastructure module.
    pub infrastructure: PathBuf,
}

impl ProjectInfo {
    /// Lay out a project rooted at `root`.
    ///
    /// Modular archetypes get one sub-directory per module; the others point
    /// every module at the root itself.
    pub fn new(
        archetype: Archetype,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        package: impl Into<String>,
        root: &Path,
    ) -> Self {
        let module = |kind: ModuleKind| {
            if archetype.is_modular() {
                root.join(kind.as_str())
            } else {
                root.to_path_buf()
            }
        };
        Self {
            archetype,
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            package: package.into(),
            domain: module(ModuleKind::Domain),
            application: module(ModuleKind::Application),
            infrastructure: module(ModuleKind::Infrastructure),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.package.trim().is_empty() {
            return Err(DomainError::InvalidProjectInfo("package is empty".into()));
        }
        if self.artifact_id.trim().is_empty() {
            return Err(DomainError::InvalidProjectInfo(
                "artifactId is empty".into(),
            ));
        }
        for kind in ModuleKind::ALL {
            let path = self.module_path(kind);
            if !path.is_absolute() {
                return Err(DomainError::InvalidProjectInfo(format!(
                    "{kind} path '{}' is not absolute",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn module_path(&self, kind: ModuleKind) -> &Path {
        match kind {
            ModuleKind::Domain => &self.domain,
            ModuleKind::Application => &self.application,
            ModuleKind::Infrastructure => &self.infrastructure,
        }
    }

    /// Directory holding the aggregator descriptor.
    pub fn project_root(&self) -> &Path {
        if self.archetype.is_modular() {
            self.domain.parent().unwrap_or(&self.domain)
        } else {
            &self.domain
        }
    }

    /// Module directory name relative to the project root, `None` for a
    /// single-module project.
    pub fn module_name(&self, kind: ModuleKind) -> Option<&'static str> {
        self.archetype.is_modular().then_some(kind.as_str())
    }

    /// Fully qualified package of `layer`.
    ///
    /// `com.acme` + [`Layer::Model`] → `com.acme.domain.model` for a
    /// hexagonal project, `com.acme.model` otherwise.
    pub fn package_for(&self, layer: Layer) -> String {
        let mut segments = package_segments(&self.package);
        if self.archetype.is_modular() {
            segments.push(layer.module().as_str().to_string());
        }
        segments.extend(layer.segments().iter().map(|s| s.to_string()));
        segments.join(".")
    }

    /// Where the source unit `type_name` of `layer` is written.
    pub fn location(&self, layer: Layer, type_name: &str) -> ArtifactLocation {
        ArtifactLocation {
            module_path: self.module_path(layer.module()).to_path_buf(),
            source_set: SourceSet::Main,
            package: self.package_for(layer),
            file_name: format!("{type_name}.{SOURCE_EXTENSION}"),
        }
    }

    /// Fully qualified name of `type_name` living in `layer`.
    pub fn qualified_name(&self, layer: Layer, type_name: &str) -> String {
        format!("{}.{type_name}", self.package_for(layer))
    }
}
