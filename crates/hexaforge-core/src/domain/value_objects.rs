//! Domain value objects: Archetype, ModuleKind, Layer, SourceSet, Server.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers. Where a value decides a
//! path or a package segment, that mapping lives here too so every generator
//! agrees on it.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language directory under `src/main` and `src/test`.
pub const SOURCE_LANGUAGE: &str = "java";

/// Extension of every generated source unit.
pub const SOURCE_EXTENSION: &str = "java";

/// Build descriptor file name inside each module directory.
pub const DESCRIPTOR_FILE: &str = "pom.xml";

/// Persisted project record, written once by `create-project`.
pub const PROJECT_INFO_FILE: &str = "project_info.json";

// ── Archetype ────────────────────────────────────────────────────────────────

/// Project layout requested at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Archetype {
    /// Three modules: domain, application, infrastructure.
    #[default]
    Hexa,
    Mvc,
    Jsf,
    Rest,
}

impl Archetype {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hexa => "HEXA",
            Self::Mvc => "MVC",
            Self::Jsf => "JSF",
            Self::Rest => "REST",
        }
    }

    /// Whether the project is split into one module per [`ModuleKind`].
    pub const fn is_modular(self) -> bool {
        matches!(self, Self::Hexa)
    }

    /// Packaging of the module that carries the runnable application.
    pub const fn packaging(self) -> &'static str {
        match self {
            Self::Jsf => "war",
            _ => "jar",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HEXA" | "HEXAGONAL" => Ok(Self::Hexa),
            "MVC" => Ok(Self::Mvc),
            "JSF" => Ok(Self::Jsf),
            "REST" => Ok(Self::Rest),
            _ => Err(DomainError::UnknownArchetype(s.to_string())),
        }
    }
}

// ── ModuleKind ───────────────────────────────────────────────────────────────

/// One buildable sub-project of a hexagonal project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Domain,
    Application,
    Infrastructure,
}

impl ModuleKind {
    pub const ALL: [Self; 3] = [Self::Domain, Self::Application, Self::Infrastructure];

    /// Directory name and package segment of the module.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Application => "application",
            Self::Infrastructure => "infrastructure",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Layer ────────────────────────────────────────────────────────────────────

/// A package family that generators write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Model,
    Repository,
    UseCase,
    Service,
    Entity,
    PersistenceRepository,
    Rest,
    RestDto,
    Config,
}

impl Layer {
    /// Module hosting the layer in a hexagonal project.
    pub const fn module(self) -> ModuleKind {
        match self {
            Self::Model | Self::Repository | Self::UseCase => ModuleKind::Domain,
            Self::Service => ModuleKind::Application,
            Self::Entity
            | Self::PersistenceRepository
            | Self::Rest
            | Self::RestDto
            | Self::Config => ModuleKind::Infrastructure,
        }
    }

    /// Package segments below the module segment.
    pub const fn segments(self) -> &'static [&'static str] {
        match self {
            Self::Model => &["model"],
            Self::Repository | Self::PersistenceRepository => &["repository"],
            Self::UseCase => &["usecase"],
            Self::Service => &["service"],
            Self::Entity => &["entity"],
            Self::Rest => &["rest"],
            Self::RestDto => &["rest", "dto"],
            Self::Config => &["config"],
        }
    }
}

// ── SourceSet ────────────────────────────────────────────────────────────────

/// `src/main` or `src/test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceSet {
    #[default]
    Main,
    Test,
}

impl SourceSet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

/// Embedded web server selectable with `set-server`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Server {
    Tomcat,
    Jetty,
    Undertow,
}

impl Server {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tomcat => "tomcat",
            Self::Jetty => "jetty",
            Self::Undertow => "undertow",
        }
    }

    /// Spring Boot starter pulling the server in.
    pub fn starter_artifact(self) -> String {
        format!("spring-boot-starter-{}", self.as_str())
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Server {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tomcat" => Ok(Self::Tomcat),
            "jetty" => Ok(Self::Jetty),
            "undertow" => Ok(Self::Undertow),
            _ => Err(DomainError::UnknownServer(s.to_string())),
        }
    }
}
