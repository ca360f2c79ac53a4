// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for hexaforge.
//!
//! Pure data and rules: project layout, build descriptor model, type
//! definitions, the markup document tree and the line buffer helpers. No
//! filesystem, network or markup engine is touched here; those live behind
//! the ports of the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: every operation is a pure function of its inputs
//! - **Few external crates**: std, thiserror, serde and serde_json
//! - **Value semantics**: domain objects are Clone + PartialEq

pub mod entities;
pub mod error;
pub mod text;
pub mod value_objects;

pub use entities::{
    artifact::{ArtifactLocation, GeneratedArtifact},
    configuration::{Importables, RemoteConfig},
    definition::{
        Association, ColumnMeta, DefinitionSet, EntityDefinition, Field, FieldDef, Finder,
        MethodDef, Parameter, ServiceDefinition, UseCaseDefinition, parameters_from_types,
    },
    document::{Document, Element},
    pom::{Dependency, Parent, Plugin, PomModel},
    project_info::ProjectInfo,
    schema::{
        HttpMethod, Operation, OperationParam, ParamLocation, PathGroup, SchemaDef,
        SchemaProperty, SchemaType, first_segment,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    Archetype, DESCRIPTOR_FILE, Layer, ModuleKind, PROJECT_INFO_FILE, SOURCE_EXTENSION,
    SOURCE_LANGUAGE, Server, SourceSet,
};
