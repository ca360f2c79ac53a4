pub mod artifact;
pub mod configuration;
pub mod definition;
pub mod document;
pub mod pom;
pub mod project_info;
pub mod schema;
