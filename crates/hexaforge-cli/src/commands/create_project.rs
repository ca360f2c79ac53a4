//! Implementation of `hexaforge create-project`.

use tracing::{debug, instrument};

use hexaforge_adapters::{LocalFileSink, XmlDocumentStore};
use hexaforge_core::{
    application::{CreateProjectRequest, ProjectService},
    domain::Archetype,
};

use crate::{
    cli::CreateProjectArgs,
    commands::{absolute, current_dir, print_report},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `create-project`.
///
/// 1. Resolve archetype and coordinates (flags, then config defaults)
/// 2. Assemble the project through `ProjectService`
/// 3. Print the report and next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CreateProjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let request = build_request(&args, &config)?;
    debug!(
        archetype = %request.archetype,
        base_dir = %request.base_dir.display(),
        "Request resolved"
    );

    let service = ProjectService::new(
        Box::new(LocalFileSink::new()),
        Box::new(XmlDocumentStore::new()),
        config.configuration_provider(),
    );

    output.header(&format!("Creating '{}' ({})...", args.name, request.archetype))?;
    let created = service.create_project(&request)?;
    print_report(&output, "create-project", &created.report)?;

    let root = created.info.project_root();
    output.success(&format!("Project created at {}", root.display()))?;
    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", root.display()))?;
        output.print("  hexaforge add-model models.json")?;
        output.print("  mvn package")?;
    }
    Ok(())
}

fn build_request(args: &CreateProjectArgs, config: &AppConfig) -> CliResult<CreateProjectRequest> {
    let cwd = current_dir()?;
    let base_dir = match &args.dir {
        Some(dir) => absolute(&cwd, dir),
        None => cwd,
    };
    if base_dir.exists() && !base_dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("--dir {} is not a directory", base_dir.display()),
            source: None,
        });
    }

    let archetype = match args.arch {
        Some(arch) => Archetype::from(arch),
        None => config
            .defaults
            .archetype
            .parse()
            .map_err(|e| CliError::ConfigError {
                message: format!("defaults.archetype: {e}"),
                source: None,
            })?,
    };

    let mut request = CreateProjectRequest::new(&args.name, base_dir)
        .archetype(archetype)
        .group_id(args.group_id.as_deref().unwrap_or(config.defaults.group_id.as_str()));
    if let Some(artifact_id) = &args.artifact_id {
        request = request.artifact_id(artifact_id);
    }
    if let Some(package) = &args.package {
        request = request.package(package);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ArchArg;
    use std::path::PathBuf;

    fn args() -> CreateProjectArgs {
        CreateProjectArgs {
            name: "shop".into(),
            arch: None,
            group_id: None,
            artifact_id: None,
            package: None,
            dir: Some(PathBuf::from("/work")),
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let request = build_request(&args(), &AppConfig::default()).unwrap();
        assert_eq!(request.archetype, Archetype::Hexa);
        assert_eq!(request.group_id.as_deref(), Some("com.example"));
        assert_eq!(request.base_dir, PathBuf::from("/work"));
    }

    #[test]
    fn flags_win_over_config() {
        let mut args = args();
        args.arch = Some(ArchArg::Rest);
        args.group_id = Some("com.acme".into());
        let request = build_request(&args, &AppConfig::default()).unwrap();
        assert_eq!(request.archetype, Archetype::Rest);
        assert_eq!(request.group_id.as_deref(), Some("com.acme"));
    }

    #[test]
    fn bad_default_archetype_is_a_config_error() {
        let mut config = AppConfig::default();
        config.defaults.archetype = "ONION".into();
        let err = build_request(&args(), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
