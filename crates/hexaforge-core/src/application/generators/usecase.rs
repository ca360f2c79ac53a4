use tracing::instrument;

use crate::{
    application::{
        builders::{ClassFileBuilder, FieldDeclaration, MethodDeclaration},
        generators::{GenerationReport, GeneratorContext},
    },
    domain::{DefinitionSet, Layer, UseCaseDefinition, text::lower_first},
};

/// One use-case class per definition in the domain module.
///
/// Every injected repository becomes an import, a final field and a
/// constructor parameter.
#[instrument(skip_all, fields(definitions = definitions.len()))]
pub fn generate_use_cases(ctx: GeneratorContext<'_>, definitions: &DefinitionSet) -> GenerationReport {
    let mut report = GenerationReport::new();
    for (name, value) in definitions.iter() {
        match UseCaseDefinition::parse(name, value) {
            Ok(definition) => {
                let result = use_case_builder(ctx, &definition).build(ctx.importables, ctx.sink);
                report.record(name, result);
            }
            Err(e) => report.fail(name, e),
        }
    }
    report
}

fn use_case_builder(ctx: GeneratorContext<'_>, definition: &UseCaseDefinition) -> ClassFileBuilder {
    let mut builder = ClassFileBuilder::new(&definition.name)
        .at(ctx.info.location(Layer::UseCase, &definition.name));

    for repository in &definition.injects {
        builder = builder
            .import(ctx.info.qualified_name(Layer::Repository, repository))
            .field(FieldDeclaration::new(repository, lower_first(repository)).constructor_param());
    }
    for method in &definition.methods {
        builder = builder.method(MethodDeclaration::from(method));
    }
    builder
}
