//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hexaforge_core::domain::{Archetype, Server};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hexaforge",
    bin_name = "hexaforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Hexagonal Maven project generator",
    long_about = "hexaforge creates multi-module Maven projects and generates \
                  Java sources for them from JSON definitions and OpenAPI documents.",
    after_help = "EXAMPLES:\n\
        \x20 hexaforge create-project shop --arch HEXA --groupId com.acme\n\
        \x20 hexaforge add-model models.json\n\
        \x20 hexaforge add-rest-adapter api.yaml\n\
        \x20 hexaforge set-server jetty",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
///
/// Every command except `create-project` and `completions` runs from a
/// project root, where `project_info.json` lives.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project skeleton.
    #[command(
        about = "Create a new project",
        long_about = "Create a new project in <DIR>/<NAME>. The project root receives \
                      project_info.json; run the add-* and set-server commands from there.",
        after_help = "EXAMPLES:\n\
            \x20 hexaforge create-project shop\n\
            \x20 hexaforge create-project shop --arch REST --groupId com.acme --package com.acme.shop"
    )]
    CreateProject(CreateProjectArgs),

    /// Generate domain models and their repositories.
    #[command(about = "Generate domain models from a definition file")]
    AddModel(DefinitionArgs),

    /// Generate persistence entities and their repositories.
    #[command(about = "Generate JPA entities from a definition file")]
    AddEntity(DefinitionArgs),

    /// Generate application services.
    #[command(about = "Generate services from a definition file")]
    AddService(DefinitionArgs),

    /// Generate use cases.
    #[command(about = "Generate use cases from a definition file")]
    AddUsecase(DefinitionArgs),

    /// Generate DTOs and controllers from an OpenAPI document.
    #[command(about = "Generate a REST adapter from an OpenAPI document")]
    AddRestAdapter(RestAdapterArgs),

    /// Switch the embedded web server.
    #[command(
        about = "Select the embedded web server",
        after_help = "EXAMPLES:\n\
            \x20 hexaforge set-server undertow"
    )]
    SetServer(SetServerArgs),

    /// Add a database driver listed by the remote configuration.
    #[command(about = "Add a database driver dependency")]
    AddDatabase(AddDatabaseArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hexaforge completions bash > ~/.local/share/bash-completion/completions/hexaforge\n\
            \x20 hexaforge completions zsh  > ~/.zfunc/_hexaforge"
    )]
    Completions(CompletionsArgs),
}

// ── create-project ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateProjectArgs {
    /// Project directory name, created under `--dir`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Project layout.
    #[arg(long = "arch", value_name = "ARCH", value_enum, ignore_case = true)]
    pub arch: Option<ArchArg>,

    /// Maven groupId (default from config, else `com.example`).
    #[arg(long = "groupId", visible_alias = "group-id", value_name = "GROUP")]
    pub group_id: Option<String>,

    /// Maven artifactId (default: the project name).
    #[arg(long = "artifactId", visible_alias = "artifact-id", value_name = "ARTIFACT")]
    pub artifact_id: Option<String>,

    /// Base Java package (default: `<groupId>.<artifactId>`).
    #[arg(long = "package", value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Directory the project is created in (default: current directory).
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Archetypes as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPERCASE")]
pub enum ArchArg {
    Hexa,
    Mvc,
    Jsf,
    Rest,
}

impl From<ArchArg> for Archetype {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::Hexa => Archetype::Hexa,
            ArchArg::Mvc => Archetype::Mvc,
            ArchArg::Jsf => Archetype::Jsf,
            ArchArg::Rest => Archetype::Rest,
        }
    }
}

// ── generation ────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DefinitionArgs {
    /// JSON definition file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct RestAdapterArgs {
    /// OpenAPI document (`.json`, `.yaml` or `.yml`).
    #[arg(value_name = "OPENAPI_FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct SetServerArgs {
    #[arg(value_name = "SERVER", value_enum, ignore_case = true)]
    pub server: ServerArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ServerArg {
    Tomcat,
    Jetty,
    Undertow,
}

impl From<ServerArg> for Server {
    fn from(arg: ServerArg) -> Self {
        match arg {
            ServerArg::Tomcat => Server::Tomcat,
            ServerArg::Jetty => Server::Jetty,
            ServerArg::Undertow => Server::Undertow,
        }
    }
}

#[derive(Debug, Args)]
pub struct AddDatabaseArgs {
    /// Key under `databases` in the remote configuration, e.g. `postgres`.
    #[arg(value_name = "KIND")]
    pub kind: String,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hexaforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_project() {
        let cli = Cli::parse_from([
            "hexaforge",
            "create-project",
            "shop",
            "--arch",
            "rest",
            "--groupId",
            "com.acme",
        ]);
        let Commands::CreateProject(args) = cli.command else {
            panic!("expected create-project");
        };
        assert_eq!(args.name, "shop");
        assert_eq!(args.arch, Some(ArchArg::Rest));
        assert_eq!(args.group_id.as_deref(), Some("com.acme"));
        assert!(args.artifact_id.is_none());
    }

    #[test]
    fn kebab_case_aliases() {
        let cli = Cli::parse_from(["hexaforge", "create-project", "shop", "--group-id", "org.x"]);
        let Commands::CreateProject(args) = cli.command else {
            panic!("expected create-project");
        };
        assert_eq!(args.group_id.as_deref(), Some("org.x"));
    }

    #[test]
    fn archetype_names_are_uppercase() {
        assert_eq!(Archetype::from(ArchArg::Jsf), Archetype::Jsf);
        let cli = Cli::try_parse_from(["hexaforge", "create-project", "x", "--arch", "HEXA"]);
        assert!(cli.is_ok());
        assert!(Cli::try_parse_from(["hexaforge", "create-project", "x", "--arch", "onion"]).is_err());
    }

    #[test]
    fn parse_generation_commands() {
        for command in ["add-model", "add-entity", "add-service", "add-usecase", "add-rest-adapter"] {
            assert!(Cli::try_parse_from(["hexaforge", command, "defs.json"]).is_ok(), "{command}");
        }
    }

    #[test]
    fn set_server_accepts_known_servers_only() {
        let cli = Cli::parse_from(["hexaforge", "set-server", "Jetty"]);
        let Commands::SetServer(args) = cli.command else {
            panic!("expected set-server");
        };
        assert_eq!(Server::from(args.server), Server::Jetty);
        assert!(Cli::try_parse_from(["hexaforge", "set-server", "netty"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["hexaforge", "--quiet", "--verbose", "add-model", "m.json"]);
        assert!(result.is_err());
    }
}
