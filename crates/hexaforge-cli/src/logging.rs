//! Tracing setup for the `hexaforge` binary.
//!
//! Library crates only emit events. Their targets are listed in
//! [`WORKSPACE_TARGETS`] and follow `-v`/`-q`; the HTTP stack used for remote
//! configuration stays at `warn` unless `RUST_LOG` says otherwise.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Tracing targets owned by this workspace.
const WORKSPACE_TARGETS: [&str; 3] = ["hexaforge", "hexaforge_core", "hexaforge_adapters"];

/// Dependencies whose chatter is capped regardless of verbosity.
const NOISY_DEPENDENCIES: [&str; 3] = ["reqwest", "hyper_util", "rustls"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    // Targets tell core and adapter events apart once debugging.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(level >= LevelFilter::DEBUG)
        .without_time()
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing already initialised: {e}"))
}

/// `--quiet` beats any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `EnvFilter` directives: workspace targets at `level`, dependencies at
/// `warn` or quieter.
fn filter_directives(level: LevelFilter) -> String {
    let dependency_level = level.min(LevelFilter::WARN);
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .chain(
            NOISY_DEPENDENCIES
                .iter()
                .map(|target| format!("{target}={dependency_level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(&args_with(0, false)), LevelFilter::WARN);
        assert_eq!(level_for(&args_with(1, false)), LevelFilter::INFO);
        assert_eq!(level_for(&args_with(2, false)), LevelFilter::DEBUG);
        assert_eq!(level_for(&args_with(3, false)), LevelFilter::TRACE);
        assert_eq!(level_for(&args_with(10, false)), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(level_for(&args_with(0, true)), LevelFilter::ERROR);
        assert_eq!(level_for(&args_with(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn every_workspace_crate_follows_the_level() {
        let directives = filter_directives(LevelFilter::DEBUG);
        for target in WORKSPACE_TARGETS {
            assert!(directives.contains(&format!("{target}=debug")), "{directives}");
        }
    }

    #[test]
    fn http_stack_capped_at_warn() {
        let directives = filter_directives(LevelFilter::TRACE);
        assert!(directives.contains("reqwest=warn"));
        assert!(!directives.contains("reqwest=trace"));

        let quiet = filter_directives(LevelFilter::ERROR);
        assert!(quiet.contains("reqwest=error"));
    }

    #[test]
    fn directives_parse() {
        assert!(EnvFilter::try_new(filter_directives(LevelFilter::INFO)).is_ok());
    }
}
