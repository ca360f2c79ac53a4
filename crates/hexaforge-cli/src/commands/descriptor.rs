//! Build-descriptor commands: `set-server` and `add-database`.

use tracing::instrument;

use hexaforge_core::domain::Server;

use crate::{
    cli::{AddDatabaseArgs, SetServerArgs},
    commands::open_project,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn set_server(args: SetServerArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let server = Server::from(args.server);
    let service = open_project(&config)?;
    let path = service.set_server(server)?;
    output.success(&format!("Server set to {server} in {}", path.display()))?;
    Ok(())
}

#[instrument(skip_all, fields(kind = %args.kind))]
pub fn add_database(args: AddDatabaseArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = open_project(&config)?;
    let path = service.add_database(&args.kind)?;
    output.success(&format!("Added {} driver to {}", args.kind, path.display()))?;
    Ok(())
}
