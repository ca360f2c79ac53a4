use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    application::{
        builders::{ClassFileBuilder, FieldDeclaration},
        generators::{GenerationReport, GeneratorContext, repository},
    },
    domain::{
        Association, ColumnMeta, DefinitionSet, EntityDefinition, Field, Layer, ProjectInfo,
    },
};

const LOMBOK_GETTER: &str = "lombok.Getter";
const LOMBOK_SETTER: &str = "lombok.Setter";
const PERSISTENCE: &str = "jakarta.persistence";

/// Which layer an entity definition is generated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityFlavor {
    /// Plain domain model.
    Model,
    /// JPA entity in the infrastructure module.
    Persistence,
}

impl EntityFlavor {
    pub const fn layer(self) -> Layer {
        match self {
            Self::Model => Layer::Model,
            Self::Persistence => Layer::Entity,
        }
    }

    pub const fn repository_layer(self) -> Layer {
        match self {
            Self::Model => Layer::Repository,
            Self::Persistence => Layer::PersistenceRepository,
        }
    }
}

/// Generate one entity (and its repository) per definition.
#[instrument(skip_all, fields(flavor = ?flavor, definitions = definitions.len()))]
pub fn generate_entities(
    ctx: GeneratorContext<'_>,
    definitions: &DefinitionSet,
    flavor: EntityFlavor,
) -> GenerationReport {
    let mut report = GenerationReport::new();
    for (name, value) in definitions.iter() {
        match EntityDefinition::parse(name, value) {
            Ok(definition) => generate_entity(ctx, &definition, flavor, &mut report),
            Err(e) => report.fail(name, e),
        }
    }
    info!(
        written = report.written.len(),
        failed = report.errors.len(),
        "Entity generation finished"
    );
    report
}

fn generate_entity(
    ctx: GeneratorContext<'_>,
    definition: &EntityDefinition,
    flavor: EntityFlavor,
    report: &mut GenerationReport,
) {
    let key = match definition.primary_key() {
        Ok(key) => key,
        Err(e) => {
            report.fail(&definition.name, e);
            return;
        }
    };

    let entity = entity_builder(ctx.info, definition, flavor).build(ctx.importables, ctx.sink);
    if !report.record(&definition.name, entity) {
        return;
    }

    let repository_name = repository::repository_name(&definition.name);
    let repository = repository::repository_builder(ctx.info, definition, &key.ty, flavor)
        .build(ctx.importables, ctx.sink);
    report.record(&repository_name, repository);
}

pub(crate) fn entity_builder(
    info: &ProjectInfo,
    definition: &EntityDefinition,
    flavor: EntityFlavor,
) -> ClassFileBuilder {
    let mut builder = ClassFileBuilder::new(&definition.name)
        .at(info.location(flavor.layer(), &definition.name))
        .import(LOMBOK_GETTER)
        .import(LOMBOK_SETTER);

    if flavor == EntityFlavor::Persistence {
        let table = definition.table.as_deref().unwrap_or(&definition.name);
        builder = builder
            .import(format!("{PERSISTENCE}.Entity"))
            .import(format!("{PERSISTENCE}.Table"))
            .annotation("@Entity")
            .annotation(format!("@Table(name = \"{table}\")"));
    }
    builder = builder.annotation("@Getter").annotation("@Setter");

    for field in &definition.fields {
        let (declaration, imports) = match flavor {
            EntityFlavor::Model => (FieldDeclaration::new(&field.ty, &field.name), Vec::new()),
            EntityFlavor::Persistence => persistence_field(field),
        };
        for import in imports {
            builder = builder.import(format!("{PERSISTENCE}.{import}"));
        }
        builder = builder.field(declaration);
    }
    builder
}

/// Field with its JPA annotations, plus the persistence types it uses.
fn persistence_field(field: &Field) -> (FieldDeclaration, Vec<&'static str>) {
    let mut declaration = FieldDeclaration::new(&field.ty, &field.name);
    let mut imports = Vec::new();

    if field.primary_key {
        declaration = declaration.annotation("@Id");
        imports.push("Id");
    }

    match &field.association {
        Some(Association::ManyToOne { fetch }) => {
            declaration = match fetch {
                Some(fetch) => {
                    imports.push("FetchType");
                    declaration.annotation(format!("@ManyToOne(fetch = FetchType.{fetch})"))
                }
                None => declaration.annotation("@ManyToOne"),
            };
            declaration = declaration.annotation(annotation("JoinColumn", &field.column));
            imports.extend(["ManyToOne", "JoinColumn"]);
        }
        None if !field.column.is_empty() => {
            declaration = declaration.annotation(annotation("Column", &field.column));
            imports.push("Column");
        }
        None => {}
    }
    (declaration, imports)
}

/// `@Name(key = value, ...)`, or `@Name` without properties.
fn annotation(name: &str, column: &ColumnMeta) -> String {
    let properties = column.properties();
    if properties.is_empty() {
        return format!("@{name}");
    }
    let rendered = properties
        .iter()
        .map(|(key, value)| format!("{key} = {}", annotation_value(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("@{name}({rendered})")
}

/// Strings and booleans are quoted, numbers are bare.
fn annotation_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Bool(b) => format!("\"{b}\""),
        Value::Number(n) => n.to_string(),
        other => format!("\"{other}\""),
    }
}
