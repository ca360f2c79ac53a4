//! OpenAPI 3 documents as a [`SchemaSource`].
//!
//! Documents are deserialized into [`OpenApiV3Spec`] and only what the REST
//! adapter generator consumes is kept: component schemas, path operations
//! with their path/query parameters, the JSON request body and the first
//! success response. `#/components/parameters/*` references are followed;
//! schema references stay symbolic.

use std::path::Path;

use hexaforge_core::{
    application::{
        ApplicationError,
        ports::{FileSink, SchemaSource},
    },
    domain::{
        HttpMethod, Operation, OperationParam, ParamLocation, PathGroup, SchemaDef,
        SchemaProperty, SchemaType, first_segment,
    },
    error::HexaforgeResult,
};
use oas3::{
    OpenApiV3Spec,
    spec::{MediaType, ObjectOrReference, ObjectSchema, Parameter, ParameterIn, PathItem},
};
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct OpenApiSchemaSource {
    schemas: Vec<SchemaDef>,
    groups: Vec<PathGroup>,
}

impl OpenApiSchemaSource {
    /// Load a document through `sink`; `.yaml`/`.yml` files are read as
    /// YAML, anything else as JSON.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(sink: &dyn FileSink, path: &Path) -> HexaforgeResult<Self> {
        if !sink.exists(path) {
            return Err(ApplicationError::DefinitionFileMissing {
                path: path.to_path_buf(),
            }
            .into());
        }
        let raw = sink.read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml(&raw)
        } else {
            Self::from_json(&raw)
        }
    }

    pub fn from_json(raw: &str) -> HexaforgeResult<Self> {
        let spec: OpenApiV3Spec = serde_json::from_str(raw).map_err(|e| invalid("JSON", e))?;
        Ok(Self::from_spec(&spec))
    }

    pub fn from_yaml(raw: &str) -> HexaforgeResult<Self> {
        let spec: OpenApiV3Spec = serde_yaml::from_str(raw).map_err(|e| invalid("YAML", e))?;
        Ok(Self::from_spec(&spec))
    }

    pub fn from_spec(spec: &OpenApiV3Spec) -> Self {
        let schemas = component_schemas(spec);
        let groups = path_groups(spec);
        debug!(
            title = %spec.info.title,
            schemas = schemas.len(),
            groups = groups.len(),
            "OpenAPI document parsed"
        );
        Self { schemas, groups }
    }
}

fn invalid(format: &str, error: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::SchemaSource {
        reason: format!("not an OpenAPI {format} document: {error}"),
    }
}

impl SchemaSource for OpenApiSchemaSource {
    fn schemas(&self) -> Vec<SchemaDef> {
        self.schemas.clone()
    }

    fn path_groups(&self) -> Vec<PathGroup> {
        self.groups.clone()
    }
}

// ── Schemas ──────────────────────────────────────────────────────────────────

fn component_schemas(spec: &OpenApiV3Spec) -> Vec<SchemaDef> {
    let Some(components) = spec.components.as_ref() else {
        return Vec::new();
    };

    components
        .schemas
        .iter()
        .map(|(name, schema)| SchemaDef {
            name: name.clone(),
            properties: match schema {
                ObjectOrReference::Object(object) => properties(object),
                ObjectOrReference::Ref { .. } => Vec::new(),
            },
        })
        .collect()
}

fn properties(schema: &ObjectSchema) -> Vec<SchemaProperty> {
    schema_value(schema)
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, value)| SchemaProperty {
                    name: name.clone(),
                    ty: schema_type(value),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn schema_value(schema: &ObjectSchema) -> Value {
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

fn schema_of(schema: &ObjectOrReference<ObjectSchema>) -> SchemaType {
    match schema {
        ObjectOrReference::Ref { ref_path, .. } => SchemaType::Ref(ref_name(ref_path).to_string()),
        ObjectOrReference::Object(object) => schema_type(&schema_value(object)),
    }
}

/// Java-facing type of a serialized schema; nested `$ref`s stay symbolic.
fn schema_type(schema: &Value) -> SchemaType {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        return SchemaType::Ref(ref_name(reference).to_string());
    }
    let format = schema
        .get("format")
        .and_then(Value::as_str)
        .map(str::to_string);
    match schema.get("type").and_then(Value::as_str) {
        Some("string") => SchemaType::String { format },
        Some("integer") => SchemaType::Integer { format },
        Some("number") => SchemaType::Number { format },
        Some("boolean") => SchemaType::Boolean,
        Some("array") => SchemaType::Array(Box::new(
            schema
                .get("items")
                .map(schema_type)
                .unwrap_or(SchemaType::Object),
        )),
        _ => SchemaType::Object,
    }
}

/// `#/components/schemas/Customer` → `Customer`.
fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

// ── Paths ────────────────────────────────────────────────────────────────────

fn path_groups(spec: &OpenApiV3Spec) -> Vec<PathGroup> {
    let Some(paths) = spec.paths.as_ref() else {
        return Vec::new();
    };

    let mut groups: Vec<PathGroup> = Vec::new();
    for (path, item) in paths {
        for (method, operation) in operations(item) {
            let operation = Operation {
                method,
                path: path.clone(),
                operation_id: operation.operation_id.clone(),
                parameters: parameters(spec, &item.parameters, &operation.parameters),
                request_body: request_body(operation),
                response: success_response(operation),
            };

            let segment = first_segment(path);
            match groups.iter_mut().find(|g| g.segment == segment) {
                Some(group) => group.operations.push(operation),
                None => groups.push(PathGroup {
                    segment: segment.to_string(),
                    operations: vec![operation],
                }),
            }
        }
    }
    groups
}

fn operations(item: &PathItem) -> Vec<(HttpMethod, &oas3::spec::Operation)> {
    [
        item.get.as_ref().map(|op| (HttpMethod::Get, op)),
        item.post.as_ref().map(|op| (HttpMethod::Post, op)),
        item.put.as_ref().map(|op| (HttpMethod::Put, op)),
        item.patch.as_ref().map(|op| (HttpMethod::Patch, op)),
        item.delete.as_ref().map(|op| (HttpMethod::Delete, op)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Path-level parameters first, operation-level ones override by name.
fn parameters(
    spec: &OpenApiV3Spec,
    shared: &[ObjectOrReference<Parameter>],
    own: &[ObjectOrReference<Parameter>],
) -> Vec<OperationParam> {
    let mut params: Vec<OperationParam> = Vec::new();

    for entry in shared.iter().chain(own) {
        let Some(param) = resolve_parameter(spec, entry) else {
            continue;
        };
        let location = match param.location {
            ParameterIn::Path => ParamLocation::Path,
            ParameterIn::Query => ParamLocation::Query,
            _ => continue,
        };
        let param = OperationParam {
            name: param.name.clone(),
            location,
            ty: param
                .schema
                .as_ref()
                .map(schema_of)
                .unwrap_or(SchemaType::String { format: None }),
        };
        match params
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => params.push(param),
        }
    }
    params
}

fn resolve_parameter<'a>(
    spec: &'a OpenApiV3Spec,
    entry: &'a ObjectOrReference<Parameter>,
) -> Option<&'a Parameter> {
    match entry {
        ObjectOrReference::Object(param) => Some(param),
        ObjectOrReference::Ref { ref_path, .. } => {
            let name = ref_path.strip_prefix("#/components/parameters/")?;
            match spec.components.as_ref()?.parameters.get(name)? {
                ObjectOrReference::Object(param) => Some(param),
                ObjectOrReference::Ref { .. } => None,
            }
        }
    }
}

fn request_body(operation: &oas3::spec::Operation) -> Option<SchemaType> {
    match operation.request_body.as_ref()? {
        ObjectOrReference::Object(body) => content_schema(
            body.content
                .get("application/json")
                .or_else(|| body.content.values().next()),
        ),
        ObjectOrReference::Ref { .. } => None,
    }
}

/// First `2xx` response carrying a body.
fn success_response(operation: &oas3::spec::Operation) -> Option<SchemaType> {
    operation
        .responses
        .as_ref()?
        .iter()
        .filter(|(code, _)| code.starts_with('2'))
        .find_map(|(_, response)| match response {
            ObjectOrReference::Object(response) => content_schema(
                response
                    .content
                    .get("application/json")
                    .or_else(|| response.content.values().next()),
            ),
            ObjectOrReference::Ref { .. } => None,
        })
}

/// Schema of the preferred media type: `application/json`, else the first.
fn content_schema(media: Option<&MediaType>) -> Option<SchemaType> {
    media?.schema.as_ref().map(schema_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFileSink;
    use hexaforge_core::error::HexaforgeError;
    use serde_json::json;

    fn document() -> String {
        json!({
            "openapi": "3.0.3",
            "info": {"title": "Shop", "version": "1.0.0"},
            "paths": {
                "/customers": {
                    "get": {
                        "parameters": [{"name": "page", "in": "query", "schema": {"type": "integer"}}],
                        "responses": {"200": {"description": "ok", "content": {"application/json": {
                            "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Customer"}}
                        }}}}
                    },
                    "post": {
                        "operationId": "createCustomer",
                        "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Customer"}}}},
                        "responses": {"201": {"description": "created", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Customer"}}}}}
                    }
                },
                "/customers/{id}": {
                    "parameters": [{"$ref": "#/components/parameters/CustomerId"}],
                    "delete": {"responses": {"204": {"description": "gone"}}}
                },
                "/health": {"get": {"parameters": [{"name": "X-Trace", "in": "header"}]}}
            },
            "components": {
                "parameters": {
                    "CustomerId": {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                },
                "schemas": {
                    "Customer": {"type": "object", "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "tags": {"type": "array", "items": {"type": "string"}}
                    }},
                    "Empty": {"type": "object"}
                }
            }
        })
        .to_string()
    }

    #[test]
    fn component_schemas_with_typed_properties() {
        let source = OpenApiSchemaSource::from_json(&document()).unwrap();
        let schemas = source.schemas();
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0].name, "Customer");
        assert_eq!(schemas[0].properties[0].ty.java_type(), "Long");
        assert_eq!(schemas[0].properties[1].ty.java_type(), "List<String>");
        assert!(schemas[1].properties.is_empty());
    }

    #[test]
    fn operations_grouped_by_first_segment() {
        let source = OpenApiSchemaSource::from_json(&document()).unwrap();
        let groups = source.path_groups();
        let segments: Vec<_> = groups.iter().map(|g| g.segment.as_str()).collect();
        assert_eq!(segments, vec!["customers", "health"]);

        let customers = &groups[0].operations;
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0].method, HttpMethod::Get);
        assert_eq!(
            customers[0].response,
            Some(SchemaType::Array(Box::new(SchemaType::Ref("Customer".into()))))
        );
        assert_eq!(customers[1].operation_id.as_deref(), Some("createCustomer"));
        assert_eq!(customers[1].request_body, Some(SchemaType::Ref("Customer".into())));

        let delete = &customers[2];
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.parameters.len(), 1);
        assert_eq!(delete.parameters[0].location, ParamLocation::Path);
        assert!(delete.response.is_none());

        assert!(groups[1].operations[0].parameters.is_empty());
    }

    #[test]
    fn yaml_document_read_through_the_sink() {
        let sink = MemoryFileSink::new();
        sink.create_dir_all(Path::new("/api")).unwrap();
        sink.write_file(
            Path::new("/api/orders.yaml"),
            "openapi: 3.0.3
info:
  title: Orders
  version: '1.0.0'
paths:
  /orders/{id}:
    get:
      operationId: findOrder
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
            format: uuid
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Order'
components:
  schemas:
    Order:
      type: object
      properties:
        placedAt:
          type: string
          format: date-time
",
        )
        .unwrap();

        let source = OpenApiSchemaSource::from_path(&sink, Path::new("/api/orders.yaml")).unwrap();
        let groups = source.path_groups();
        assert_eq!(groups[0].segment, "orders");
        let find = &groups[0].operations[0];
        assert_eq!(find.operation_id.as_deref(), Some("findOrder"));
        assert_eq!(find.parameters[0].ty.java_type(), "UUID");
        assert_eq!(find.response, Some(SchemaType::Ref("Order".into())));
        assert_eq!(source.schemas()[0].properties[0].ty.java_type(), "OffsetDateTime");
    }

    #[test]
    fn schema_referenced_only_by_a_request_body() {
        let raw = json!({
            "openapi": "3.0.3",
            "info": {"title": "Orders", "version": "1"},
            "paths": {"/orders": {"post": {
                "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/NewOrder"}}}},
                "responses": {"202": {"description": "accepted"}}
            }}},
            "components": {"schemas": {"NewOrder": {"type": "object", "properties": {
                "quantity": {"type": "integer"}
            }}}}
        })
        .to_string();

        let source = OpenApiSchemaSource::from_json(&raw).unwrap();
        assert_eq!(source.schemas()[0].name, "NewOrder");
        assert_eq!(source.schemas()[0].properties[0].ty.java_type(), "Integer");
        let post = &source.path_groups()[0].operations[0];
        assert_eq!(post.request_body, Some(SchemaType::Ref("NewOrder".into())));
        assert!(post.response.is_none());
    }

    #[test]
    fn missing_document_is_reported() {
        let sink = MemoryFileSink::new();
        assert!(matches!(
            OpenApiSchemaSource::from_path(&sink, Path::new("/nowhere/api.json")),
            Err(HexaforgeError::Application(ApplicationError::DefinitionFileMissing { .. }))
        ));
    }

    #[test]
    fn rejects_non_openapi_input() {
        assert!(OpenApiSchemaSource::from_json("[1, 2]").is_err());
        assert!(OpenApiSchemaSource::from_json(r#"{"name": "x"}"#).is_err());
        assert!(OpenApiSchemaSource::from_yaml("- just\n- a list\n").is_err());
    }
}
