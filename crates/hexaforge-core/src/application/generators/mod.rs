//! Domain generators: definitions in, source artifacts out.
//!
//! Every generator walks its definitions in file order and reports per
//! artifact; one failing definition never stops its siblings.

pub mod entity;
pub mod repository;
pub mod rest;
pub mod service;
pub mod usecase;

use std::path::PathBuf;

use tracing::error;

use crate::{
    application::ports::FileSink,
    domain::{Importables, ProjectInfo},
    error::{HexaforgeError, HexaforgeResult},
};

pub use entity::{EntityFlavor, generate_entities};
pub use repository::base_repository;
pub use rest::generate_rest_adapter;
pub use service::generate_services;
pub use usecase::generate_use_cases;

/// Everything a generator needs besides its definitions.
#[derive(Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub info: &'a ProjectInfo,
    pub importables: &'a Importables,
    pub sink: &'a dyn FileSink,
}

/// A definition that produced no artifact.
#[derive(Debug, Clone)]
pub struct GenerationIssue {
    pub artifact: String,
    pub error: HexaforgeError,
}

/// Outcome of one generation command.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub errors: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of writing `artifact`. Returns whether it succeeded.
    pub fn record(&mut self, artifact: &str, result: HexaforgeResult<PathBuf>) -> bool {
        match result {
            Ok(path) => {
                self.written.push(path);
                true
            }
            Err(e) => {
                self.fail(artifact, e);
                false
            }
        }
    }

    pub fn fail(&mut self, artifact: &str, error: impl Into<HexaforgeError>) {
        let error = error.into();
        error!(artifact, error = %error, "Artifact skipped");
        self.errors.push(GenerationIssue {
            artifact: artifact.to_string(),
            error,
        });
    }

    pub fn merge(&mut self, other: GenerationReport) {
        self.written.extend(other.written);
        self.errors.extend(other.errors);
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
