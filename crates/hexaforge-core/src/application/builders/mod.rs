//! Builders turning structured input into line buffers and documents.
//!
//! - [`ClassFileBuilder`]: classes and interfaces
//! - [`RecordFileBuilder`]: records
//! - [`PomBuilder`]: build descriptors
//!
//! Source builders share one layout: package declaration, blank line,
//! imports, blank line, then the declaration.

pub mod class;
pub mod pom;
pub mod record;

use std::collections::BTreeSet;

pub use class::{ClassFileBuilder, FieldDeclaration, MethodDeclaration, UnitKind};
pub use pom::{PomBuilder, render_document};
pub use record::RecordFileBuilder;

use crate::domain::Importables;

/// Explicit imports plus every import the referenced types need.
///
/// Types in `java.lang` and types from `own_package` are dropped.
pub(crate) fn resolve_imports<'a>(
    explicit: &BTreeSet<String>,
    types: impl IntoIterator<Item = &'a str>,
    importables: &Importables,
    own_package: &str,
) -> BTreeSet<String> {
    let mut imports = explicit.clone();
    for ty in types {
        imports.extend(importables.imports_for(ty));
    }
    imports.retain(|import| {
        let package = import.rsplit_once('.').map(|(p, _)| p).unwrap_or_default();
        package != "java.lang" && package != own_package
    });
    imports
}

/// `package x;` and import block, each followed by a blank line.
pub(crate) fn preamble(package: &str, imports: &BTreeSet<String>) -> Vec<String> {
    let mut lines = Vec::new();
    if !package.is_empty() {
        lines.push(format!("package {package};"));
        lines.push(String::new());
    }
    if !imports.is_empty() {
        lines.extend(imports.iter().map(|i| format!("import {i};")));
        lines.push(String::new());
    }
    lines
}
