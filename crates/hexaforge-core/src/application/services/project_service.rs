//! Project Service - creates a new project skeleton.
//!
//! Workflow:
//! 1. Resolve the request into a [`ProjectInfo`]
//! 2. Refuse an existing project directory
//! 3. Run the module assemblers for the archetype
//! 4. Persist `project_info.json` in the project root

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        assemblers::{AssemblyContext, assemblers_for},
        configuration::ConfigurationProvider,
        generators::GenerationReport,
        ports::{DocumentStore, FileSink},
    },
    domain::{
        Archetype, DomainError, PROJECT_INFO_FILE, ProjectInfo,
        text::package_segment,
    },
    error::{Context, HexaforgeResult},
};

pub const DEFAULT_GROUP_ID: &str = "com.example";

/// Input of `create-project`; unset values are derived from the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub name: String,
    /// Directory the project directory is created in. Must be absolute.
    pub base_dir: PathBuf,
    pub archetype: Archetype,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub package: Option<String>,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
            archetype: Archetype::default(),
            group_id: None,
            artifact_id: None,
            package: None,
        }
    }

    pub fn archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = archetype;
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Project layout with defaults applied.
    ///
    /// artifactId defaults to the name, package to
    /// `<groupId>.<artifactId as a package segment>`.
    pub fn resolve(&self) -> Result<ProjectInfo, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(DomainError::InvalidProjectInfo(format!(
                "project name '{name}' must be a plain directory name"
            )));
        }

        let group_id = self
            .group_id
            .clone()
            .unwrap_or_else(|| DEFAULT_GROUP_ID.to_string());
        let artifact_id = self.artifact_id.clone().unwrap_or_else(|| name.to_string());
        let package = self
            .package
            .clone()
            .unwrap_or_else(|| format!("{group_id}.{}", package_segment(&artifact_id)));

        let info = ProjectInfo::new(
            self.archetype,
            group_id,
            artifact_id,
            package,
            &self.base_dir.join(name),
        );
        info.validate()?;
        Ok(info)
    }
}

/// Outcome of `create-project`.
#[derive(Debug, Clone)]
pub struct ProjectCreated {
    pub info: ProjectInfo,
    pub report: GenerationReport,
}

pub struct ProjectService {
    sink: Box<dyn FileSink>,
    store: Box<dyn DocumentStore>,
    config: ConfigurationProvider,
}

impl ProjectService {
    pub fn new(
        sink: Box<dyn FileSink>,
        store: Box<dyn DocumentStore>,
        config: ConfigurationProvider,
    ) -> Self {
        Self { sink, store, config }
    }

    #[instrument(skip_all, fields(name = %request.name, archetype = %request.archetype))]
    pub fn create_project(&self, request: &CreateProjectRequest) -> HexaforgeResult<ProjectCreated> {
        let info = request.resolve()?;
        let root = info.project_root().to_path_buf();

        if self.sink.exists(&root) {
            warn!(path = %root.display(), "Project directory already exists");
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }
        self.sink.create_dir_all(&root)?;

        let ctx = AssemblyContext {
            info: &info,
            config: &self.config,
            sink: self.sink.as_ref(),
            store: self.store.as_ref(),
        };
        let mut report = GenerationReport::new();
        for assembler in assemblers_for(info.archetype) {
            report.merge(assembler.assemble(&ctx));
        }

        let info_path = root.join(PROJECT_INFO_FILE);
        let json = serde_json::to_string_pretty(&info).context("serializing project info")?;
        self.sink.write_file(&info_path, &json)?;
        report.written.push(info_path);

        info!(
            path = %root.display(),
            files = report.written.len(),
            errors = report.errors.len(),
            "Project created"
        );
        Ok(ProjectCreated { info, report })
    }
}

/// Read `project_info.json` from `dir`.
///
/// # Errors
///
/// [`ApplicationError::ProjectInfoMissing`] when the file does not exist,
/// [`ApplicationError::ProjectInfoUnreadable`] when it does not parse, and
/// [`DomainError::InvalidProjectInfo`] when its content is inconsistent.
pub fn load_project_info(sink: &dyn FileSink, dir: &Path) -> HexaforgeResult<ProjectInfo> {
    let path = dir.join(PROJECT_INFO_FILE);
    if !sink.exists(&path) {
        return Err(ApplicationError::ProjectInfoMissing { path }.into());
    }
    let content = sink.read_to_string(&path)?;
    let info: ProjectInfo =
        serde_json::from_str(&content).map_err(|e| ApplicationError::ProjectInfoUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    info.validate()?;
    Ok(info)
}
