//! Source generation commands: `add-model`, `add-entity`, `add-service`,
//! `add-usecase` and `add-rest-adapter`.

use std::path::Path;

use tracing::{info, instrument};

use hexaforge_adapters::{LocalFileSink, OpenApiSchemaSource};
use hexaforge_core::{
    application::{GenerationReport, GenerationService},
    domain::DefinitionSet,
};

use crate::{
    cli::{DefinitionArgs, RestAdapterArgs},
    commands::{absolute, current_dir, open_project, print_report},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Kind of artifact generated from a JSON definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Model,
    Entity,
    Service,
    UseCase,
}

impl DefinitionKind {
    pub const fn command(self) -> &'static str {
        match self {
            Self::Model => "add-model",
            Self::Entity => "add-entity",
            Self::Service => "add-service",
            Self::UseCase => "add-usecase",
        }
    }

    fn generate(self, service: &GenerationService, definitions: &DefinitionSet) -> GenerationReport {
        match self {
            Self::Model => service.add_models(definitions),
            Self::Entity => service.add_entities(definitions),
            Self::Service => service.add_services(definitions),
            Self::UseCase => service.add_use_cases(definitions),
        }
    }
}

#[instrument(skip_all, fields(command = kind.command(), file = %args.file.display()))]
pub fn execute(
    kind: DefinitionKind,
    args: DefinitionArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = open_project(&config)?;
    let file = absolute(&current_dir()?, &args.file);

    let definitions = service.load_definitions(&file)?;
    info!(definitions = definitions.len(), "Definitions loaded");
    output.info(&format!(
        "{} definition(s) from {}",
        definitions.len(),
        file.display()
    ))?;

    let report = kind.generate(&service, &definitions);
    print_report(&output, kind.command(), &report)
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute_rest_adapter(
    args: RestAdapterArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = open_project(&config)?;
    let file = absolute(&current_dir()?, &args.file);
    let source = load_schema_source(&file)?;

    let report = service.add_rest_adapter(&source);
    print_report(&output, "add-rest-adapter", &report)
}

fn load_schema_source(file: &Path) -> CliResult<OpenApiSchemaSource> {
    Ok(OpenApiSchemaSource::from_path(&LocalFileSink::new(), file)?)
}
