//! Command handlers.
//!
//! Each handler turns parsed arguments into a core service call and prints
//! the outcome. No generation logic lives here.

pub mod completions;
pub mod create_project;
pub mod descriptor;
pub mod generate;

use std::path::{Path, PathBuf};

use hexaforge_adapters::{LocalFileSink, XmlDocumentStore};
use hexaforge_core::application::{GenerationReport, GenerationService, load_project_info};

use crate::{
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Print what a generation command wrote and which artifacts it skipped.
///
/// Skipped artifacts do not fail the command.
pub fn print_report(output: &OutputManager, what: &str, report: &GenerationReport) -> CliResult<()> {
    for path in &report.written {
        tracing::debug!(path = %path.display(), "Written");
    }
    for issue in &report.errors {
        output.error(&format!("{}: {}", issue.artifact, issue.error))?;
    }

    let written = report.written.len();
    if report.is_success() {
        output.success(&format!("{what}: {written} file(s) written"))?;
    } else {
        output.warning(&format!(
            "{what}: {written} file(s) written, {} skipped",
            report.errors.len()
        ))?;
    }
    Ok(())
}

/// Working directory the generation commands operate on.
pub fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().with_cli_context(|| "reading the current directory")
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Generation service over the project rooted at the working directory.
pub fn open_project(config: &AppConfig) -> CliResult<GenerationService> {
    let cwd = current_dir()?;
    let sink = LocalFileSink::new();
    let info = load_project_info(&sink, &cwd).with_cli_context(|| "loading project info")?;
    tracing::debug!(
        artifact = %info.artifact_id,
        archetype = %info.archetype,
        "Project loaded"
    );
    Ok(GenerationService::new(
        info,
        Box::new(sink),
        Box::new(XmlDocumentStore::new()),
        config.configuration_provider(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_keeps_absolute_paths() {
        assert_eq!(
            absolute(Path::new("/work"), Path::new("/tmp/models.json")),
            PathBuf::from("/tmp/models.json")
        );
        assert_eq!(
            absolute(Path::new("/work"), Path::new("defs/models.json")),
            PathBuf::from("/work/defs/models.json")
        );
    }
}
