//! Flags accepted by every hexaforge subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log generator activity on stderr.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Log generator activity (-v, -vv, -vvv)",
        long_help = "Log generator activity on stderr:
    -v      files written and skipped, remote configuration fetches
    -vv     definitions parsed, descriptor edits
    -vvv    everything, including per-artifact rendering"
    )]
    pub verbose: u8,

    /// Only report failures.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only report failures"
    )]
    pub quiet: bool,

    /// Plain output. `NO_COLOR` set to anything but a falsey value implies it.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "hexaforge settings file",
        long_help = "TOML settings file with [remote], [defaults] and [output] tables. \
Without it the platform config directory is tried. \
HEXAFORGE_<TABLE>__<KEY> variables override either, \
e.g. HEXAFORGE_REMOTE__CONFIG_URL."
    )]
    pub config: Option<PathBuf>,

    /// Ignore the remote configuration source.
    #[arg(
        long = "offline",
        global = true,
        help = "Generate without remote configuration",
        long_help = "Skip the remote configuration source. Generated sources get no \
extra imports and add-database knows no databases."
    )]
    pub offline: bool,
}
