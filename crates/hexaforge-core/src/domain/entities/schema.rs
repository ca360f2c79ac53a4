//! API description as seen by the REST adapter generator.
//!
//! Produced by a [`SchemaSource`](crate::application::ports::SchemaSource)
//! from an OpenAPI document; only what the generator needs is kept.

use std::fmt;

/// Type of a schema property or operation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    String { format: Option<String> },
    Integer { format: Option<String> },
    Number { format: Option<String> },
    Boolean,
    Array(Box<SchemaType>),
    /// Reference to a named component schema.
    Ref(String),
    Object,
}

impl SchemaType {
    /// Java type the schema maps to.
    pub fn java_type(&self) -> String {
        match self {
            Self::String { format } => match format.as_deref() {
                Some("date") => "LocalDate".into(),
                Some("date-time") => "OffsetDateTime".into(),
                Some("uuid") => "UUID".into(),
                _ => "String".into(),
            },
            Self::Integer { format } => match format.as_deref() {
                Some("int64") => "Long".into(),
                _ => "Integer".into(),
            },
            Self::Number { format } => match format.as_deref() {
                Some("float") => "Float".into(),
                _ => "Double".into(),
            },
            Self::Boolean => "Boolean".into(),
            Self::Array(items) => format!("List<{}>", items.java_type()),
            Self::Ref(name) => name.clone(),
            Self::Object => "Object".into(),
        }
    }

    /// Standard library imports the mapped type needs.
    pub fn imports(&self) -> Vec<&'static str> {
        match self {
            Self::String { format } => match format.as_deref() {
                Some("date") => vec!["java.time.LocalDate"],
                Some("date-time") => vec!["java.time.OffsetDateTime"],
                Some("uuid") => vec!["java.util.UUID"],
                _ => Vec::new(),
            },
            Self::Array(items) => {
                let mut imports = vec!["java.util.List"];
                imports.extend(items.imports());
                imports
            }
            _ => Vec::new(),
        }
    }

    /// Name of the component schema this type refers to, looking through
    /// arrays.
    pub fn referenced_schema(&self) -> Option<&str> {
        match self {
            Self::Ref(name) => Some(name),
            Self::Array(items) => items.referenced_schema(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProperty {
    pub name: String,
    pub ty: SchemaType,
}

/// A named component schema, properties in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDef {
    pub name: String,
    pub properties: Vec<SchemaProperty>,
}

// ── Operations ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Lower-case key used by OpenAPI path items.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Spring mapping annotation, without the `@`.
    pub const fn mapping_annotation(&self) -> &'static str {
        match self {
            Self::Get => "GetMapping",
            Self::Post => "PostMapping",
            Self::Put => "PutMapping",
            Self::Patch => "PatchMapping",
            Self::Delete => "DeleteMapping",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationParam {
    pub name: String,
    pub location: ParamLocation,
    pub ty: SchemaType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub method: HttpMethod,
    /// Full path, e.g. `/customers/{id}`.
    pub path: String,
    pub operation_id: Option<String>,
    pub parameters: Vec<OperationParam>,
    pub request_body: Option<SchemaType>,
    pub response: Option<SchemaType>,
}

impl Operation {
    /// Path below the group's first segment: `/customers/{id}` → `/{id}`,
    /// `/customers` → empty.
    pub fn sub_path(&self) -> &str {
        let trimmed = self.path.trim_start_matches('/');
        match trimmed.find('/') {
            Some(index) => &trimmed[index..],
            None => "",
        }
    }

    /// Names of `{templated}` path segments, in order.
    pub fn path_variables(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|s| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
            .collect()
    }
}

/// Operations sharing a first path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGroup {
    pub segment: String,
    pub operations: Vec<Operation>,
}

/// First segment of an API path: `/customers/{id}` → `customers`.
pub fn first_segment(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or_default()
}
