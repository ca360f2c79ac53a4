//! Build descriptor (`pom.xml`) rendering and in-place updates.
//!
//! Descriptors are rendered from a [`PomModel`] into a [`Document`] and
//! persisted through the [`DocumentStore`]. Updates are read-modify-write:
//! open, edit the tree, save. Failures are logged and reported as `None`;
//! callers decide whether a missing descriptor matters.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::ports::{DocumentStore, FileSink},
    domain::{DESCRIPTOR_FILE, Dependency, Document, Element, Parent, Plugin, PomModel},
};

pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

/// Order of the top-level groups under `project`.
const GROUP_ORDER: [&str; 10] = [
    "modelVersion",
    "groupId",
    "parent",
    "version",
    "artifactId",
    "packaging",
    "modules",
    "dependencies",
    "properties",
    "build",
];

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render `model` into a fresh document. Absent or empty groups are omitted.
pub fn render_document(model: &PomModel) -> Document {
    let mut root = Element::new("project");
    root.set_attribute("xmlns", POM_NAMESPACE);
    root.set_attribute("xmlns:xsi", XSI_NAMESPACE);
    root.set_attribute("xsi:schemaLocation", SCHEMA_LOCATION);

    root.append_child("modelVersion", Some(model.model_version.as_str()));
    if let Some(group_id) = &model.group_id {
        root.append_child("groupId", Some(group_id.as_str()));
    }
    if let Some(parent) = &model.parent {
        root.push(parent_element(parent));
    }
    if let Some(version) = &model.version {
        root.append_child("version", Some(version.as_str()));
    }
    root.append_child("artifactId", Some(model.artifact_id.as_str()));
    root.append_child("packaging", Some(model.packaging.as_str()));

    if !model.modules.is_empty() {
        let modules = root.append_child("modules", None);
        for module in &model.modules {
            modules.append_child("module", Some(module.as_str()));
        }
    }
    if !model.dependencies.is_empty() {
        let dependencies = root.append_child("dependencies", None);
        for dependency in &model.dependencies {
            dependencies.push(dependency_element(dependency));
        }
    }
    if !model.properties.is_empty() {
        let properties = root.append_child("properties", None);
        for (key, value) in &model.properties {
            properties.append_child(key.as_str(), Some(value.as_str()));
        }
    }
    if !model.build_plugins.is_empty() {
        let plugins = root
            .append_child("build", None)
            .append_child("plugins", None);
        for plugin in &model.build_plugins {
            plugins.push(plugin_element(plugin));
        }
    }

    Document::from_root(root)
}

fn parent_element(parent: &Parent) -> Element {
    let mut element = Element::new("parent");
    element.append_child("groupId", Some(parent.group_id.as_str()));
    element.append_child("artifactId", Some(parent.artifact_id.as_str()));
    element.append_child("version", Some(parent.version.as_str()));
    if let Some(relative_path) = &parent.relative_path {
        let text = (!relative_path.is_empty()).then_some(relative_path.as_str());
        element.append_child("relativePath", text);
    }
    element
}

fn dependency_element(dependency: &Dependency) -> Element {
    let mut element = Element::new("dependency");
    element.append_child("groupId", Some(dependency.group_id.as_str()));
    element.append_child("artifactId", Some(dependency.artifact_id.as_str()));
    if let Some(version) = &dependency.version {
        element.append_child("version", Some(version.as_str()));
    }
    if let Some(scope) = &dependency.scope {
        element.append_child("scope", Some(scope.as_str()));
    }
    if dependency.optional {
        element.append_child("optional", Some("true"));
    }
    element
}

fn plugin_element(plugin: &Plugin) -> Element {
    let mut element = Element::new("plugin");
    element.append_child("groupId", Some(plugin.group_id.as_str()));
    element.append_child("artifactId", Some(plugin.artifact_id.as_str()));
    if let Some(version) = &plugin.version {
        element.append_child("version", Some(version.as_str()));
    }
    if !plugin.configuration.is_empty() {
        let configuration = element.append_child("configuration", None);
        for (key, value) in &plugin.configuration {
            configuration.append_child(key.as_str(), Some(value.as_str()));
        }
    }
    element
}

fn same_coordinates(element: &Element, group_id: &str, artifact_id: &str) -> bool {
    element.child_text("groupId") == Some(group_id)
        && element.child_text("artifactId") == Some(artifact_id)
}

fn group_rank(name: &str) -> Option<usize> {
    GROUP_ORDER.iter().position(|g| *g == name)
}

/// Top-level group `name`, inserted at its canonical position when missing.
fn ensure_group<'a>(root: &'a mut Element, name: &str) -> &'a mut Element {
    if let Some(index) = root.children().iter().position(|c| c.name() == name) {
        return &mut root.children_mut()[index];
    }
    let rank = group_rank(name).unwrap_or(GROUP_ORDER.len());
    let index = root
        .children()
        .iter()
        .rposition(|c| group_rank(c.name()).is_some_and(|r| r <= rank))
        .map_or(0, |i| i + 1);
    root.insert(index, Element::new(name))
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Creates and edits the descriptors of one project.
pub struct PomBuilder<'a> {
    sink: &'a dyn FileSink,
    store: &'a dyn DocumentStore,
    project_root: &'a Path,
}

impl<'a> PomBuilder<'a> {
    pub fn new(sink: &'a dyn FileSink, store: &'a dyn DocumentStore, project_root: &'a Path) -> Self {
        Self {
            sink,
            store,
            project_root,
        }
    }

    /// `pom.xml` of `module`, or of the project root when `None`.
    pub fn descriptor_path(&self, module: Option<&str>) -> PathBuf {
        match module {
            Some(module) => self.project_root.join(module).join(DESCRIPTOR_FILE),
            None => self.project_root.join(DESCRIPTOR_FILE),
        }
    }

    /// Write `<module_path>/pom.xml` from `model`, creating the directory.
    #[instrument(skip_all, fields(module = %module_path.display(), artifact = %model.artifact_id))]
    pub fn create_descriptor(&self, module_path: &Path, model: &PomModel) -> Option<PathBuf> {
        if let Err(e) = self.sink.create_dir_all(module_path) {
            error!(error = %e, "Cannot create module directory");
            return None;
        }
        let path = module_path.join(DESCRIPTOR_FILE);
        match self.store.save(&path, &render_document(model)) {
            Ok(()) => {
                info!(path = %path.display(), "Build descriptor created");
                Some(path)
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Cannot save build descriptor");
                None
            }
        }
    }

    /// Append `dependency` unless one with the same coordinates exists.
    #[instrument(skip_all, fields(dependency = %dependency.coordinates(), module = module.unwrap_or("<root>")))]
    pub fn add_dependency(&self, dependency: &Dependency, module: Option<&str>) -> Option<PathBuf> {
        self.update(module, |root| {
            let dependencies = ensure_group(root, "dependencies");
            if dependencies
                .children_named("dependency")
                .any(|d| same_coordinates(d, &dependency.group_id, &dependency.artifact_id))
            {
                debug!("Dependency already declared");
                return;
            }
            dependencies.push(dependency_element(dependency));
        })
    }

    /// Set every entry of `properties`, overwriting existing keys in place.
    #[instrument(skip_all, fields(count = properties.len(), module = module.unwrap_or("<root>")))]
    pub fn add_property(
        &self,
        properties: &BTreeMap<String, String>,
        module: Option<&str>,
    ) -> Option<PathBuf> {
        self.update(module, |root| {
            let group = ensure_group(root, "properties");
            for (key, value) in properties {
                match group.child_mut(key) {
                    Some(existing) => existing.set_text(value.as_str()),
                    None => {
                        group.append_child(key.as_str(), Some(value.as_str()));
                    }
                }
            }
        })
    }

    /// Append `plugin` under `build/plugins` unless already declared.
    #[instrument(skip_all, fields(plugin = %plugin.coordinates(), module = module.unwrap_or("<root>")))]
    pub fn add_plugin(&self, plugin: &Plugin, module: Option<&str>) -> Option<PathBuf> {
        self.update(module, |root| {
            let plugins = ensure_group(root, "build").child_or_append("plugins");
            if plugins
                .children_named("plugin")
                .any(|p| same_coordinates(p, &plugin.group_id, &plugin.artifact_id))
            {
                debug!("Plugin already declared");
                return;
            }
            plugins.push(plugin_element(plugin));
        })
    }

    fn update(&self, module: Option<&str>, edit: impl FnOnce(&mut Element)) -> Option<PathBuf> {
        let path = self.descriptor_path(module);
        let Some(mut document) = self.store.open(&path) else {
            warn!(path = %path.display(), "Build descriptor missing or unreadable");
            return None;
        };
        let Some(root) = document.root_mut() else {
            warn!(path = %path.display(), "Build descriptor has no root element");
            return None;
        };
        edit(root);
        match self.store.save(&path, &document) {
            Ok(()) => Some(path),
            Err(e) => {
                error!(error = %e, path = %path.display(), "Cannot save build descriptor");
                None
            }
        }
    }
}
