use tracing::instrument;

use crate::{
    application::{
        builders::{ClassFileBuilder, MethodDeclaration},
        generators::{GenerationReport, GeneratorContext},
    },
    domain::{DefinitionSet, Layer, ServiceDefinition},
};

const SERVICE_ANNOTATION: &str = "org.springframework.stereotype.Service";

/// One `@Service` class per definition in the application module.
///
/// Methods take no parameters; only the declared return type is kept.
#[instrument(skip_all, fields(definitions = definitions.len()))]
pub fn generate_services(ctx: GeneratorContext<'_>, definitions: &DefinitionSet) -> GenerationReport {
    let mut report = GenerationReport::new();
    for (name, value) in definitions.iter() {
        match ServiceDefinition::parse(name, value) {
            Ok(definition) => {
                let result = service_builder(ctx, &definition).build(ctx.importables, ctx.sink);
                report.record(name, result);
            }
            Err(e) => report.fail(name, e),
        }
    }
    report
}

fn service_builder(ctx: GeneratorContext<'_>, definition: &ServiceDefinition) -> ClassFileBuilder {
    definition.methods.iter().fold(
        ClassFileBuilder::new(&definition.name)
            .at(ctx.info.location(Layer::Service, &definition.name))
            .import(SERVICE_ANNOTATION)
            .annotation("@Service"),
        |builder, method| {
            builder.method(MethodDeclaration::new(&method.name).returns(&method.return_type))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{Recorder, hexa_project};
    use crate::domain::Importables;

    #[test]
    fn service_class() {
        let info = hexa_project();
        let sink = Recorder::default();
        let importables = Importables::new();
        let ctx = GeneratorContext {
            info: &info,
            importables: &importables,
            sink: &sink,
        };
        let definitions = DefinitionSet::parse(
            r#"{"BillingService":{"methods":{
                "charge":{"parameters":{"amount":"Long"},"return":"Boolean:true"},
                "refund":null}}}"#,
        )
        .unwrap();

        let report = generate_services(ctx, &definitions);
        assert!(report.is_success());

        let content = sink
            .file("/work/shop/application/src/main/java/com/acme/application/service/BillingService.java")
            .unwrap();
        assert!(content.contains("import org.springframework.stereotype.Service;"));
        assert!(content.contains("@Service\npublic class BillingService {"));
        assert!(content.contains("    public Boolean charge() {\n        return null;\n    }"));
        assert!(content.contains("    public void refund() {\n        // Not implemented yet\n    }"));
    }
}
