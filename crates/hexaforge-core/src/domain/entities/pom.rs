//! Build descriptor model.
//!
//! One [`PomModel`] per module; it only exists while a module is being
//! assembled and is rendered to a markup document by
//! [`PomBuilder`](crate::application::builders::PomBuilder).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_VERSION: &str = "4.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomModel {
    pub model_version: String,
    pub parent: Option<Parent>,
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub version: Option<String>,
    pub packaging: String,
    pub modules: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub properties: BTreeMap<String, String>,
    pub build_plugins: Vec<Plugin>,
}

impl PomModel {
    /// A `jar` descriptor with nothing but an artifact id.
    pub fn new(artifact_id: impl Into<String>) -> Self {
        Self {
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            parent: None,
            group_id: None,
            artifact_id: artifact_id.into(),
            version: None,
            packaging: "jar".to_string(),
            modules: Vec::new(),
            dependencies: Vec::new(),
            properties: BTreeMap::new(),
            build_plugins: Vec::new(),
        }
    }

    pub fn parent(mut self, parent: Parent) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = packaging.into();
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn plugin(mut self, plugin: Plugin) -> Self {
        self.build_plugins.push(plugin);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// `Some("")` renders an empty `<relativePath/>` (lookup in repositories).
    pub relative_path: Option<String>,
}

impl Parent {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            relative_path: None,
        }
    }

    pub fn relative_path(mut self, path: impl Into<String>) -> Self {
        self.relative_path = Some(path.into());
        self
    }
}

/// One `<dependency>` entry.
///
/// Also the shape of the `databases` descriptors served by the remote
/// configuration, hence the camelCase serde names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: None,
            optional: false,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// `groupId:artifactId`.
    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// One `<plugin>` entry under `build/plugins`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub configuration: BTreeMap<String, String>,
}

impl Plugin {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            configuration: BTreeMap::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn configuration(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration.insert(key.into(), value.into());
        self
    }

    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}
