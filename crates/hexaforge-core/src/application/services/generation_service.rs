//! Generation Service - every command run inside an existing project.
//!
//! Source generation (`add-*`) returns a [`GenerationReport`]; descriptor
//! edits (`set-server`, `add-database`) fail as a whole.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        builders::PomBuilder,
        configuration::ConfigurationProvider,
        generators::{
            EntityFlavor, GenerationReport, GeneratorContext, generate_entities,
            generate_rest_adapter, generate_services, generate_use_cases,
        },
        ports::{DocumentStore, FileSink, SchemaSource},
    },
    domain::{
        DefinitionSet, Dependency, DomainError, ModuleKind, ProjectInfo, Server,
    },
    error::HexaforgeResult,
};

pub struct GenerationService {
    info: ProjectInfo,
    sink: Box<dyn FileSink>,
    store: Box<dyn DocumentStore>,
    config: ConfigurationProvider,
}

impl GenerationService {
    pub fn new(
        info: ProjectInfo,
        sink: Box<dyn FileSink>,
        store: Box<dyn DocumentStore>,
        config: ConfigurationProvider,
    ) -> Self {
        Self {
            info,
            sink,
            store,
            config,
        }
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.info
    }

    /// Read and parse a definition file.
    pub fn load_definitions(&self, path: &Path) -> HexaforgeResult<DefinitionSet> {
        if !self.sink.exists(path) {
            return Err(ApplicationError::DefinitionFileMissing {
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = self.sink.read_to_string(path)?;
        Ok(DefinitionSet::parse(&content)?)
    }

    fn context(&self) -> GeneratorContext<'_> {
        GeneratorContext {
            info: &self.info,
            importables: self.config.importables(),
            sink: self.sink.as_ref(),
        }
    }

    pub fn add_models(&self, definitions: &DefinitionSet) -> GenerationReport {
        generate_entities(self.context(), definitions, EntityFlavor::Model)
    }

    pub fn add_entities(&self, definitions: &DefinitionSet) -> GenerationReport {
        generate_entities(self.context(), definitions, EntityFlavor::Persistence)
    }

    pub fn add_services(&self, definitions: &DefinitionSet) -> GenerationReport {
        generate_services(self.context(), definitions)
    }

    pub fn add_use_cases(&self, definitions: &DefinitionSet) -> GenerationReport {
        generate_use_cases(self.context(), definitions)
    }

    pub fn add_rest_adapter(&self, source: &dyn SchemaSource) -> GenerationReport {
        generate_rest_adapter(self.context(), source)
    }

    /// Module carrying the runnable application; `None` is the project root.
    fn runtime_module(&self) -> Option<&'static str> {
        self.info.module_name(ModuleKind::Infrastructure)
    }

    fn poms(&self) -> PomBuilder<'_> {
        PomBuilder::new(
            self.sink.as_ref(),
            self.store.as_ref(),
            self.info.project_root(),
        )
    }

    fn descriptor_failed(&self) -> ApplicationError {
        ApplicationError::DescriptorUpdate {
            path: self.poms().descriptor_path(self.runtime_module()),
        }
    }

    /// Add the server starter and record `server.type`.
    #[instrument(skip_all, fields(server = %server))]
    pub fn set_server(&self, server: Server) -> HexaforgeResult<PathBuf> {
        let module = self.runtime_module();
        let poms = self.poms();
        let starter = Dependency::new("org.springframework.boot", server.starter_artifact());
        poms.add_dependency(&starter, module)
            .ok_or_else(|| self.descriptor_failed())?;

        let mut properties = BTreeMap::new();
        properties.insert("server.type".to_string(), server.as_str().to_string());
        let path = poms
            .add_property(&properties, module)
            .ok_or_else(|| self.descriptor_failed())?;

        info!(path = %path.display(), "Server configured");
        Ok(path)
    }

    /// Add the driver dependency listed under `databases[kind]`.
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn add_database(&self, kind: &str) -> HexaforgeResult<PathBuf> {
        let databases = self.config.databases();
        let dependency = databases.get(kind).ok_or_else(|| DomainError::UnknownDatabase {
            kind: kind.to_string(),
            available: databases.keys().cloned().collect(),
        })?;

        let path = self
            .poms()
            .add_dependency(dependency, self.runtime_module())
            .ok_or_else(|| self.descriptor_failed())?;

        info!(dependency = %dependency.coordinates(), "Database driver added");
        Ok(path)
    }
}
