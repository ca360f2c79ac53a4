//! Application services - orchestrate use cases.
//!
//! Services own their ports and coordinate the builders, generators and
//! assemblers for one command.

pub mod generation_service;
pub mod project_service;

pub use generation_service::GenerationService;
pub use project_service::{CreateProjectRequest, ProjectCreated, ProjectService, load_project_info};
