//! REST adapter: DTO records from component schemas and one controller per
//! first path segment.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::{
    application::{
        builders::{ClassFileBuilder, MethodDeclaration, RecordFileBuilder},
        generators::{GenerationReport, GeneratorContext},
        ports::SchemaSource,
    },
    domain::{
        Layer, Operation, ParamLocation, Parameter, PathGroup, ProjectInfo, SchemaDef, SchemaType,
        text::{lower_first, to_pascal_case},
    },
};

const WEB_ANNOTATIONS: &str = "org.springframework.web.bind.annotation";

#[instrument(skip_all)]
pub fn generate_rest_adapter(ctx: GeneratorContext<'_>, source: &dyn SchemaSource) -> GenerationReport {
    let mut report = GenerationReport::new();

    for schema in source.schemas() {
        let result = dto_builder(ctx.info, &schema).build(ctx.importables, ctx.sink);
        report.record(&schema.name, result);
    }
    for group in source.path_groups() {
        let name = controller_name(&group.segment);
        let result = controller_builder(ctx.info, &group).build(ctx.importables, ctx.sink);
        report.record(&name, result);
    }

    info!(written = report.written.len(), "REST adapter generated");
    report
}

fn dto_builder(info: &ProjectInfo, schema: &SchemaDef) -> RecordFileBuilder {
    let mut builder = RecordFileBuilder::new(&schema.name, info.location(Layer::RestDto, &schema.name));
    for property in &schema.properties {
        for import in property.ty.imports() {
            builder = builder.import(import);
        }
        builder = builder.component(property.ty.java_type(), java_identifier(&property.name));
    }
    builder
}

/// `customers` → `CustomersController`; the empty segment maps to `Root`.
pub fn controller_name(segment: &str) -> String {
    let base = to_pascal_case(segment);
    if base.is_empty() {
        "RootController".to_string()
    } else {
        format!("{base}Controller")
    }
}

fn controller_builder(info: &ProjectInfo, group: &PathGroup) -> ClassFileBuilder {
    let name = controller_name(&group.segment);
    let mut builder = ClassFileBuilder::new(&name)
        .at(info.location(Layer::Rest, &name))
        .import(format!("{WEB_ANNOTATIONS}.RestController"))
        .import(format!("{WEB_ANNOTATIONS}.RequestMapping"))
        .annotation("@RestController")
        .annotation(format!("@RequestMapping(\"/{}\")", group.segment));

    let mut taken = BTreeSet::new();
    for operation in &group.operations {
        let (method, imports) = handler(info, group, operation, &mut taken);
        for import in imports {
            builder = builder.import(import);
        }
        builder = builder.method(method);
    }
    builder
}

/// One handler stub plus the imports it needs.
fn handler(
    info: &ProjectInfo,
    group: &PathGroup,
    operation: &Operation,
    taken: &mut BTreeSet<String>,
) -> (MethodDeclaration, Vec<String>) {
    let mapping = operation.method.mapping_annotation();
    let mut imports = vec![format!("{WEB_ANNOTATIONS}.{mapping}")];
    let mut types: Vec<&SchemaType> = Vec::new();

    let sub_path = operation.sub_path();
    let annotation = if sub_path.is_empty() {
        format!("@{mapping}")
    } else {
        format!("@{mapping}(\"{sub_path}\")")
    };
    let mut method = MethodDeclaration::new(unique_name(handler_name(group, operation), taken))
        .annotation(annotation);

    for variable in operation.path_variables() {
        let ty = operation
            .parameters
            .iter()
            .find(|p| p.location == ParamLocation::Path && p.name == variable)
            .map(|p| {
                types.push(&p.ty);
                p.ty.java_type()
            })
            .unwrap_or_else(|| "String".to_string());
        method = method.parameter(
            Parameter::new(ty, java_identifier(variable))
                .annotated(format!("@PathVariable(\"{variable}\")")),
        );
        imports.push(format!("{WEB_ANNOTATIONS}.PathVariable"));
    }
    for param in operation
        .parameters
        .iter()
        .filter(|p| p.location == ParamLocation::Query)
    {
        types.push(&param.ty);
        method = method.parameter(
            Parameter::new(param.ty.java_type(), java_identifier(&param.name))
                .annotated(format!("@RequestParam(\"{}\")", param.name)),
        );
        imports.push(format!("{WEB_ANNOTATIONS}.RequestParam"));
    }
    if let Some(body) = &operation.request_body {
        types.push(body);
        method = method.parameter(Parameter::new(body.java_type(), "body").annotated("@RequestBody"));
        imports.push(format!("{WEB_ANNOTATIONS}.RequestBody"));
    }
    if let Some(response) = &operation.response {
        types.push(response);
        method = method.returns(response.java_type());
    }

    for ty in types {
        imports.extend(ty.imports().into_iter().map(str::to_string));
        if let Some(schema) = ty.referenced_schema() {
            imports.push(info.qualified_name(Layer::RestDto, schema));
        }
    }
    (method, imports)
}

/// `operationId`, else `<verb><Segment>` with `By<Variable>` for each path
/// variable.
fn handler_name(group: &PathGroup, operation: &Operation) -> String {
    if let Some(id) = operation.operation_id.as_deref().filter(|id| !id.is_empty()) {
        return java_identifier(id);
    }
    let mut name = format!(
        "{}{}",
        operation.method.as_str(),
        to_pascal_case(&group.segment)
    );
    let variables = operation.path_variables();
    if !variables.is_empty() {
        let by: Vec<String> = variables.iter().map(|v| to_pascal_case(v)).collect();
        name.push_str("By");
        name.push_str(&by.join("And"));
    }
    name
}

fn unique_name(base: String, taken: &mut BTreeSet<String>) -> String {
    let mut name = base.clone();
    let mut n = 2;
    while taken.contains(&name) {
        name = format!("{base}{n}");
        n += 1;
    }
    taken.insert(name.clone());
    name
}

/// `order-id` → `orderId`.
fn java_identifier(raw: &str) -> String {
    lower_first(&to_pascal_case(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{Recorder, hexa_project};
    use crate::domain::{HttpMethod, Importables, OperationParam, SchemaProperty};

    struct StaticSource {
        schemas: Vec<SchemaDef>,
        groups: Vec<PathGroup>,
    }

    impl SchemaSource for StaticSource {
        fn schemas(&self) -> Vec<SchemaDef> {
            self.schemas.clone()
        }
        fn path_groups(&self) -> Vec<PathGroup> {
            self.groups.clone()
        }
    }

    fn operation(method: HttpMethod, path: &str) -> Operation {
        Operation {
            method,
            path: path.into(),
            operation_id: None,
            parameters: Vec::new(),
            request_body: None,
            response: None,
        }
    }

    fn source() -> StaticSource {
        let customer = SchemaType::Ref("Customer".into());
        StaticSource {
            schemas: vec![SchemaDef {
                name: "Customer".into(),
                properties: vec![
                    SchemaProperty {
                        name: "id".into(),
                        ty: SchemaType::Integer {
                            format: Some("int64".into()),
                        },
                    },
                    SchemaProperty {
                        name: "birth-date".into(),
                        ty: SchemaType::String {
                            format: Some("date".into()),
                        },
                    },
                ],
            }],
            groups: vec![PathGroup {
                segment: "customers".into(),
                operations: vec![
                    Operation {
                        response: Some(SchemaType::Array(Box::new(customer.clone()))),
                        parameters: vec![OperationParam {
                            name: "page".into(),
                            location: ParamLocation::Query,
                            ty: SchemaType::Integer { format: None },
                        }],
                        ..operation(HttpMethod::Get, "/customers")
                    },
                    Operation {
                        response: Some(customer.clone()),
                        parameters: vec![OperationParam {
                            name: "id".into(),
                            location: ParamLocation::Path,
                            ty: SchemaType::Integer {
                                format: Some("int64".into()),
                            },
                        }],
                        ..operation(HttpMethod::Get, "/customers/{id}")
                    },
                    Operation {
                        operation_id: Some("createCustomer".into()),
                        request_body: Some(customer.clone()),
                        response: Some(customer),
                        ..operation(HttpMethod::Post, "/customers")
                    },
                ],
            }],
        }
    }

    #[test]
    fn dtos_and_controllers() {
        let info = hexa_project();
        let sink = Recorder::default();
        let importables = Importables::new();
        let ctx = GeneratorContext {
            info: &info,
            importables: &importables,
            sink: &sink,
        };
        let report = generate_rest_adapter(ctx, &source());
        assert!(report.is_success());
        assert_eq!(report.written.len(), 2);

        let dto = sink
            .file("/work/shop/infrastructure/src/main/java/com/acme/infrastructure/rest/dto/Customer.java")
            .unwrap();
        assert!(dto.contains("import java.time.LocalDate;"));
        assert!(dto.contains("public record Customer(\n    Long id,\n    LocalDate birthDate\n) {\n}"));

        let controller = sink
            .file("/work/shop/infrastructure/src/main/java/com/acme/infrastructure/rest/CustomersController.java")
            .unwrap();
        assert!(controller.contains("@RestController\n@RequestMapping(\"/customers\")\npublic class CustomersController {"));
        assert!(controller.contains("import com.acme.infrastructure.rest.dto.Customer;"));
        assert!(controller.contains("import java.util.List;"));
        assert!(controller.contains(
            "    @GetMapping\n    public List<Customer> getCustomers(@RequestParam(\"page\") Integer page) {"
        ));
        assert!(controller.contains(
            "    @GetMapping(\"/{id}\")\n    public Customer getCustomersById(@PathVariable(\"id\") Long id) {"
        ));
        assert!(controller.contains(
            "    @PostMapping\n    public Customer createCustomer(@RequestBody Customer body) {"
        ));
    }

    #[test]
    fn handler_names_are_unique() {
        let group = PathGroup {
            segment: "orders".into(),
            operations: vec![
                operation(HttpMethod::Get, "/orders"),
                operation(HttpMethod::Get, "/orders"),
            ],
        };
        let artifact = controller_builder(&hexa_project(), &group).render(&Importables::new());
        let content = artifact.content();
        assert!(content.contains("public void getOrders() {"));
        assert!(content.contains("public void getOrders2() {"));
    }

    #[test]
    fn controller_names() {
        assert_eq!(controller_name("customers"), "CustomersController");
        assert_eq!(controller_name("line-items"), "LineItemsController");
        assert_eq!(controller_name(""), "RootController");
    }
}
