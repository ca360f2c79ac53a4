use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

use crate::{
    application::{
        builders::{preamble, resolve_imports},
        ports::FileSink,
    },
    domain::{
        ArtifactLocation, GeneratedArtifact, Importables, Parameter,
        text::{indent, trim_trailing_comma},
    },
    error::HexaforgeResult,
};

/// Immutable data carrier: components only, no methods.
#[derive(Debug, Clone)]
pub struct RecordFileBuilder {
    name: String,
    location: ArtifactLocation,
    imports: BTreeSet<String>,
    annotations: Vec<String>,
    components: Vec<Parameter>,
}

impl RecordFileBuilder {
    pub fn new(name: impl Into<String>, location: ArtifactLocation) -> Self {
        Self {
            name: name.into(),
            location,
            imports: BTreeSet::new(),
            annotations: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn import(mut self, import: impl Into<String>) -> Self {
        self.imports.insert(import.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn component(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.components.push(Parameter::new(ty, name));
        self
    }

    pub fn render(&self, importables: &Importables) -> GeneratedArtifact {
        let imports = resolve_imports(
            &self.imports,
            self.components.iter().map(|c| c.ty.as_str()),
            importables,
            &self.location.package,
        );
        let mut lines = preamble(&self.location.package, &imports);
        lines.extend(self.annotations.iter().cloned());

        if self.components.is_empty() {
            lines.push(format!("public record {}() {{", self.name));
        } else {
            lines.push(format!("public record {}(", self.name));
            let mut components: Vec<String> = self
                .components
                .iter()
                .map(|c| indent(&format!("{} {},", c.ty, c.name), 1))
                .collect();
            trim_trailing_comma(&mut components);
            lines.extend(components);
            lines.push(") {".to_string());
        }
        lines.push("}".to_string());

        GeneratedArtifact {
            location: self.location.clone(),
            lines,
        }
    }

    pub fn build(&self, importables: &Importables, sink: &dyn FileSink) -> HexaforgeResult<PathBuf> {
        let path = sink.write_artifact(&self.render(importables))?;
        debug!(path = %path.display(), record = %self.name, "Record written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceSet;

    fn location() -> ArtifactLocation {
        ArtifactLocation {
            module_path: PathBuf::from("/p/infrastructure"),
            source_set: SourceSet::Main,
            package: "com.acme.infrastructure.rest.dto".into(),
            file_name: "CustomerDto.java".into(),
        }
    }

    #[test]
    fn components_are_comma_separated() {
        let artifact = RecordFileBuilder::new("CustomerDto", location())
            .component("Long", "id")
            .component("List<String>", "tags")
            .render(&Importables::new().with("List", "java.util.List"));

        assert_eq!(
            artifact.lines,
            vec![
                "package com.acme.infrastructure.rest.dto;",
                "",
                "import java.util.List;",
                "",
                "public record CustomerDto(",
                "    Long id,",
                "    List<String> tags",
                ") {",
                "}",
            ]
        );
    }

    #[test]
    fn empty_record() {
        let artifact = RecordFileBuilder::new("Empty", location()).render(&Importables::new());
        assert_eq!(artifact.lines.last().map(String::as_str), Some("}"));
        assert!(artifact.lines.contains(&"public record Empty() {".to_string()));
    }
}
