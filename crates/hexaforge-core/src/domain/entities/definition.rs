//! Type definitions read from the user's JSON files.
//!
//! A definition file maps artifact names to definition objects:
//!
//! ```json
//! {
//!   "Customer": {
//!     "table": "customers",
//!     "fields": {
//!       "id":    { "type": "Long", "primaryKey": true },
//!       "email": { "type": "String", "name": "email", "nullable": false, "length": 120 },
//!       "name":  "String"
//!     },
//!     "finders": {
//!       "byEmail": { "parameters": ["String"], "return": "Customer", "isCollection": false }
//!     }
//!   }
//! }
//! ```
//!
//! Field values are polymorphic ([`FieldDef`]) and resolved once at parse
//! time into a uniform [`Field`]. Object key order is preserved, so artifacts
//! list their members in the order the user wrote them.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{error::DomainError, text::{lower_first, type_tokens}};

// ── Definition file ───────────────────────────────────────────────────────────

/// Top-level `name → definition` mapping, in file order.
///
/// Entries are kept as raw JSON so one malformed definition never prevents
/// its siblings from being generated.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    entries: Vec<(String, Value)>,
}

impl DefinitionSet {
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidDefinitionFile(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(DomainError::InvalidDefinitionFile(
                "top level must be a JSON object".into(),
            ));
        };
        Ok(Self {
            entries: map.into_iter().collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Fields ────────────────────────────────────────────────────────────────────

/// A field as written in JSON: a bare type name or a detailed object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldDef {
    Simple(String),
    Detailed(DetailedFieldDef),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedFieldDef {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub many_to_one: Option<Value>,
    #[serde(flatten)]
    pub column: ColumnMeta,
}

/// Database column metadata attached to a field.
///
/// Values stay untyped JSON; their rendering depends on the JSON kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    pub name: Option<Value>,
    pub nullable: Option<Value>,
    pub length: Option<Value>,
    pub unique: Option<Value>,
    pub precision: Option<Value>,
    pub table: Option<Value>,
    pub insertable: Option<Value>,
    pub updatable: Option<Value>,
    pub column_definition: Option<Value>,
}

impl ColumnMeta {
    /// Present properties in annotation order.
    pub fn properties(&self) -> Vec<(&'static str, &Value)> {
        [
            ("name", &self.name),
            ("nullable", &self.nullable),
            ("length", &self.length),
            ("unique", &self.unique),
            ("precision", &self.precision),
            ("table", &self.table),
            ("insertable", &self.insertable),
            ("updatable", &self.updatable),
            ("columnDefinition", &self.column_definition),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(Value::Null) | None => None,
            Some(v) => Some((key, v)),
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }
}

/// Relationship carried by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    /// `manyToOne: true` or `manyToOne: { "fetch": "LAZY" }`.
    ManyToOne { fetch: Option<String> },
}

/// Uniform field record every generator works with.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub primary_key: bool,
    pub column: ColumnMeta,
    pub association: Option<Association>,
}

impl FieldDef {
    pub fn resolve(self, name: &str) -> Field {
        match self {
            Self::Simple(ty) => Field {
                name: name.to_string(),
                ty,
                primary_key: false,
                column: ColumnMeta::default(),
                association: None,
            },
            Self::Detailed(detail) => Field {
                name: name.to_string(),
                ty: detail.ty,
                primary_key: detail.primary_key,
                column: detail.column,
                association: detail.many_to_one.as_ref().and_then(parse_association),
            },
        }
    }
}

fn parse_association(value: &Value) -> Option<Association> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(fetch) => Some(Association::ManyToOne {
            fetch: Some(fetch.to_ascii_uppercase()),
        }),
        Value::Object(map) => Some(Association::ManyToOne {
            fetch: map
                .get("fetch")
                .and_then(Value::as_str)
                .map(str::to_ascii_uppercase),
        }),
        _ => Some(Association::ManyToOne { fetch: None }),
    }
}

// ── Parameters & methods ──────────────────────────────────────────────────────

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
    /// Rendered in front of the type, e.g. `@PathVariable("id")`.
    pub annotation: Option<String>,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            annotation: None,
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// Name parameters after their types: `["String", "Long"]` →
/// `String string, Long long`. Repeated types get a numeric suffix.
pub fn parameters_from_types(types: &[String]) -> Vec<Parameter> {
    let mut taken: Vec<String> = Vec::with_capacity(types.len());
    types
        .iter()
        .map(|ty| {
            let base = type_tokens(ty)
                .first()
                .map(|t| lower_first(t.rsplit('.').next().unwrap_or(t)))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "arg".to_string());
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(&name) {
                name = format!("{base}{n}");
                n += 1;
            }
            taken.push(name.clone());
            Parameter::new(ty.clone(), name)
        })
        .collect()
}

/// Split `Type:defaultExpression` into its parts. Empty means `void`.
pub fn parse_return(spec: &str) -> (String, Option<String>) {
    let (ty, default) = match spec.split_once(':') {
        Some((ty, default)) => (ty.trim(), Some(default.trim())),
        None => (spec.trim(), None),
    };
    let ty = if ty.is_empty() { "void" } else { ty };
    (
        ty.to_string(),
        default.filter(|d| !d.is_empty()).map(str::to_string),
    )
}

/// A service or use-case method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub default_return: Option<String>,
}

impl MethodDef {
    /// Accepted shapes:
    /// - `null` / `{}` → `void name()`
    /// - `"Type"` or `"Type:default"`
    /// - `{ "parameters": { "id": "Long" } | ["Long"], "return": "Type:default" }`
    pub fn parse(name: &str, value: &Value) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidDefinition {
            name: name.to_string(),
            reason,
        };
        let (parameters, return_spec) = match value {
            Value::Null => (Vec::new(), String::new()),
            Value::String(spec) => (Vec::new(), spec.clone()),
            Value::Object(map) => {
                let parameters = match map.get("parameters") {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Object(params)) => params
                        .iter()
                        .map(|(param, ty)| {
                            ty.as_str()
                                .map(|ty| Parameter::new(ty, param.clone()))
                                .ok_or_else(|| {
                                    invalid(format!("parameter '{param}' must be a type name"))
                                })
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                    Some(Value::Array(types)) => {
                        let types = string_list(types)
                            .ok_or_else(|| invalid("parameters must be type names".into()))?;
                        parameters_from_types(&types)
                    }
                    Some(_) => return Err(invalid("unsupported parameters shape".into())),
                };
                let return_spec = match map.get("return") {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(spec)) => spec.clone(),
                    Some(_) => return Err(invalid("return must be a string".into())),
                };
                (parameters, return_spec)
            }
            _ => return Err(invalid("method must be a string or an object".into())),
        };
        let (return_type, default_return) = parse_return(&return_spec);
        Ok(Self {
            name: name.to_string(),
            parameters,
            return_type,
            default_return,
        })
    }
}

fn string_list(values: &[Value]) -> Option<Vec<String>> {
    values
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// A named repository query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finder {
    pub name: String,
    pub parameters: Vec<String>,
    pub return_type: String,
    pub is_collection: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFinder {
    #[serde(default)]
    parameters: Vec<String>,
    #[serde(rename = "return")]
    return_type: String,
    #[serde(default)]
    is_collection: bool,
}

#[derive(Deserialize)]
struct RawEntity {
    #[serde(default)]
    fields: Map<String, Value>,
    #[serde(default)]
    finders: Map<String, Value>,
    #[serde(default)]
    table: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    pub name: String,
    pub table: Option<String>,
    pub fields: Vec<Field>,
    pub finders: Vec<Finder>,
}

impl EntityDefinition {
    pub fn parse(name: &str, value: &Value) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidDefinition {
            name: name.to_string(),
            reason,
        };
        let raw: RawEntity =
            serde_json::from_value(value.clone()).map_err(|e| invalid(e.to_string()))?;

        let fields = raw
            .fields
            .into_iter()
            .map(|(field, def)| {
                serde_json::from_value::<FieldDef>(def)
                    .map(|def| def.resolve(&field))
                    .map_err(|_| {
                        invalid(format!(
                            "field '{field}' must be a type name or an object with a \"type\""
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let finders = raw
            .finders
            .into_iter()
            .map(|(finder, def)| {
                serde_json::from_value::<RawFinder>(def)
                    .map(|raw| Finder {
                        name: finder.clone(),
                        parameters: raw.parameters,
                        return_type: raw.return_type,
                        is_collection: raw.is_collection,
                    })
                    .map_err(|e| invalid(format!("finder '{finder}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            table: raw.table,
            fields,
            finders,
        })
    }

    /// The single primary-key field.
    ///
    /// # Errors
    ///
    /// [`DomainError::MissingPrimaryKey`] when no field is marked, and
    /// [`DomainError::MultiplePrimaryKeys`] when more than one is.
    pub fn primary_key(&self) -> Result<&Field, DomainError> {
        let mut keys = self.fields.iter().filter(|f| f.primary_key);
        match (keys.next(), keys.count()) {
            (None, _) => Err(DomainError::MissingPrimaryKey {
                entity: self.name.clone(),
            }),
            (Some(key), 0) => Ok(key),
            (Some(_), more) => Err(DomainError::MultiplePrimaryKeys {
                entity: self.name.clone(),
                count: more + 1,
            }),
        }
    }
}

// ── Services & use cases ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawBehaviour {
    #[serde(default)]
    methods: Map<String, Value>,
    #[serde(default)]
    injects: Vec<String>,
}

fn parse_methods(name: &str, methods: Map<String, Value>) -> Result<Vec<MethodDef>, DomainError> {
    methods
        .iter()
        .map(|(method, value)| {
            MethodDef::parse(method, value).map_err(|e| match e {
                DomainError::InvalidDefinition { reason, .. } => DomainError::InvalidDefinition {
                    name: name.to_string(),
                    reason: format!("method '{method}': {reason}"),
                },
                other => other,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub name: String,
    pub methods: Vec<MethodDef>,
}

impl ServiceDefinition {
    pub fn parse(name: &str, value: &Value) -> Result<Self, DomainError> {
        let raw: RawBehaviour =
            serde_json::from_value(value.clone()).map_err(|e| DomainError::InvalidDefinition {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            methods: parse_methods(name, raw.methods)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseCaseDefinition {
    pub name: String,
    /// Repository names wired through the constructor.
    pub injects: Vec<String>,
    pub methods: Vec<MethodDef>,
}

impl UseCaseDefinition {
    pub fn parse(name: &str, value: &Value) -> Result<Self, DomainError> {
        let raw: RawBehaviour =
            serde_json::from_value(value.clone()).map_err(|e| DomainError::InvalidDefinition {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            injects: raw.injects,
            methods: parse_methods(name, raw.methods)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn definition_set_keeps_file_order() {
        let set = DefinitionSet::parse(r#"{"Zeta":{},"Alpha":{},"Mid":{}}"#).unwrap();
        let names: Vec<_> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn definition_set_rejects_non_objects() {
        assert!(matches!(
            DefinitionSet::parse("[1, 2]"),
            Err(DomainError::InvalidDefinitionFile(_))
        ));
        assert!(DefinitionSet::parse("{oops").is_err());
    }

    #[test]
    fn simple_and_detailed_fields_resolve_uniformly() {
        let entity = EntityDefinition::parse(
            "Customer",
            &json!({
                "fields": {
                    "id": { "type": "Long", "primaryKey": true },
                    "email": { "type": "String", "nullable": false, "length": 120 },
                    "name": "String"
                }
            }),
        )
        .unwrap();

        let names: Vec<_> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "email", "name"]);
        assert!(entity.fields[0].primary_key);
        assert_eq!(entity.fields[1].column.properties().len(), 2);
        assert!(entity.fields[2].column.is_empty());
        assert_eq!(entity.primary_key().unwrap().ty, "Long");
    }

    #[test]
    fn column_properties_follow_annotation_order() {
        let field: FieldDef = serde_json::from_value(json!({
            "type": "String",
            "updatable": false,
            "name": "email",
            "unique": true
        }))
        .unwrap();
        let field = field.resolve("email");
        let keys: Vec<_> = field.column.properties().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["name", "unique", "updatable"]);
    }

    #[test]
    fn many_to_one_shapes() {
        let plain: FieldDef =
            serde_json::from_value(json!({ "type": "Customer", "manyToOne": true })).unwrap();
        assert_eq!(
            plain.resolve("customer").association,
            Some(Association::ManyToOne { fetch: None })
        );

        let lazy: FieldDef = serde_json::from_value(
            json!({ "type": "Customer", "manyToOne": { "fetch": "lazy" } }),
        )
        .unwrap();
        assert_eq!(
            lazy.resolve("customer").association,
            Some(Association::ManyToOne {
                fetch: Some("LAZY".into())
            })
        );

        let off: FieldDef =
            serde_json::from_value(json!({ "type": "Customer", "manyToOne": false })).unwrap();
        assert_eq!(off.resolve("customer").association, None);
    }

    #[test]
    fn missing_and_duplicate_primary_keys() {
        let none = EntityDefinition::parse("A", &json!({ "fields": { "x": "String" } })).unwrap();
        assert!(matches!(
            none.primary_key(),
            Err(DomainError::MissingPrimaryKey { .. })
        ));

        let two = EntityDefinition::parse(
            "B",
            &json!({ "fields": {
                "a": { "type": "Long", "primaryKey": true },
                "b": { "type": "Long", "primaryKey": true }
            }}),
        )
        .unwrap();
        assert!(matches!(
            two.primary_key(),
            Err(DomainError::MultiplePrimaryKeys { count: 2, .. })
        ));
    }

    #[test]
    fn malformed_field_is_reported_with_entity_name() {
        let err = EntityDefinition::parse("Order", &json!({ "fields": { "total": 12 } }))
            .unwrap_err();
        match err {
            DomainError::InvalidDefinition { name, reason } => {
                assert_eq!(name, "Order");
                assert!(reason.contains("total"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn finders_parse() {
        let entity = EntityDefinition::parse(
            "Customer",
            &json!({
                "fields": { "id": { "type": "Long", "primaryKey": true } },
                "finders": {
                    "byEmail": { "parameters": ["String"], "return": "Customer", "isCollection": true }
                }
            }),
        )
        .unwrap();
        assert_eq!(
            entity.finders,
            vec![Finder {
                name: "byEmail".into(),
                parameters: vec!["String".into()],
                return_type: "Customer".into(),
                is_collection: true,
            }]
        );
    }

    #[test]
    fn parameter_names_derive_from_types() {
        let params = parameters_from_types(&[
            "String".to_string(),
            "String".to_string(),
            "java.time.LocalDate".to_string(),
            "List<Long>".to_string(),
        ]);
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["string", "string2", "localDate", "list"]);
    }

    #[test]
    fn return_spec_parsing() {
        assert_eq!(parse_return(""), ("void".to_string(), None));
        assert_eq!(parse_return("Customer"), ("Customer".to_string(), None));
        assert_eq!(
            parse_return("Boolean:false"),
            ("Boolean".to_string(), Some("false".to_string()))
        );
        assert_eq!(
            parse_return("String: \"a:b\""),
            ("String".to_string(), Some("\"a:b\"".to_string()))
        );
    }

    #[test]
    fn method_shapes() {
        let bare = MethodDef::parse("run", &Value::Null).unwrap();
        assert_eq!(bare.return_type, "void");
        assert!(bare.parameters.is_empty());

        let typed = MethodDef::parse(
            "execute",
            &json!({ "parameters": { "customerId": "Long", "since": "LocalDate" }, "return": "Customer:null" }),
        )
        .unwrap();
        assert_eq!(typed.parameters[1], Parameter::new("LocalDate", "since"));
        assert_eq!(typed.return_type, "Customer");
        assert_eq!(typed.default_return.as_deref(), Some("null"));

        assert!(MethodDef::parse("bad", &json!(3)).is_err());
    }

    #[test]
    fn use_case_injects() {
        let use_case = UseCaseDefinition::parse(
            "RegisterCustomer",
            &json!({ "injects": ["CustomerRepository"], "methods": { "execute": "void" } }),
        )
        .unwrap();
        assert_eq!(use_case.injects, vec!["CustomerRepository"]);
        assert_eq!(use_case.methods.len(), 1);
    }

    #[test]
    fn service_method_errors_name_the_service() {
        let err = ServiceDefinition::parse("Billing", &json!({ "methods": { "charge": 1 } }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDefinition { ref name, .. } if name == "Billing"));
    }
}
