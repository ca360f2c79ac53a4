//! # hexaforge CLI
//!
//! Generates hexagonal Maven projects and the Java sources inside them.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments; `--help` / `--version` print to stdout and exit 0.
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success (skipped artifacts are reported) |
//! |  1   | Not a project directory, or system error |
//! |  2   | User / input error                       |
//! |  4   | Configuration error                      |

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::generate::DefinitionKind,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before tracing init. A missing file is not an error.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    // try_parse reports --help / --version as errors too; clap routes those
    // to stdout, everything else to stderr.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return parse_exit_code(e.kind());
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        offline = cli.global.offline,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e:#}");
            eprintln!("Error: failed to load configuration: {e:#}");
            return ExitCode::from(4);
        }
    };

    let config = if cli.global.offline {
        debug!("Remote configuration disabled");
        config.without_remote()
    } else {
        config
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli.command, config, output) {
        Ok(()) => {
            info!("hexaforge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Exit code for a `try_parse` failure. Explicit help and version requests
/// succeed; a bare invocation that falls back to help is still a usage error.
fn parse_exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(2),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::CreateProject(args) => commands::create_project::execute(args, config, output),
        Commands::AddModel(args) => {
            commands::generate::execute(DefinitionKind::Model, args, config, output)
        }
        Commands::AddEntity(args) => {
            commands::generate::execute(DefinitionKind::Entity, args, config, output)
        }
        Commands::AddService(args) => {
            commands::generate::execute(DefinitionKind::Service, args, config, output)
        }
        Commands::AddUsecase(args) => {
            commands::generate::execute(DefinitionKind::UseCase, args, config, output)
        }
        Commands::AddRestAdapter(args) => {
            commands::generate::execute_rest_adapter(args, config, output)
        }
        Commands::SetServer(args) => commands::descriptor::set_server(args, config, output),
        Commands::AddDatabase(args) => commands::descriptor::add_database(args, config, output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// The single place where structured errors become human-readable output
/// and OS exit codes.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    // 1. Emit a structured log event at the right severity.
    err.log();

    // 2. Print a user-friendly message on stderr, coloured only on a TTY.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
