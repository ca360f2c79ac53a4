use crate::{
    application::{
        builders::{ClassFileBuilder, MethodDeclaration},
        generators::entity::EntityFlavor,
    },
    domain::{
        EntityDefinition, Finder, Layer, ProjectInfo, parameters_from_types, text::upper_first,
    },
};

/// Name of the domain repository contract.
pub const BASE_REPOSITORY: &str = "Repository";
const SPRING_DATA_REPOSITORY: &str = "org.springframework.data.repository.Repository";

pub fn repository_name(entity: &str) -> String {
    format!("{entity}Repository")
}

/// The generic `Repository<T, ID>` marker every domain repository extends.
pub fn base_repository(info: &ProjectInfo) -> ClassFileBuilder {
    ClassFileBuilder::interface(format!("{BASE_REPOSITORY}<T, ID>"))
        .at(info.location(Layer::Repository, BASE_REPOSITORY))
}

pub(crate) fn repository_builder(
    info: &ProjectInfo,
    definition: &EntityDefinition,
    key_type: &str,
    flavor: EntityFlavor,
) -> ClassFileBuilder {
    let name = repository_name(&definition.name);
    let mut builder = ClassFileBuilder::interface(&name)
        .at(info.location(flavor.repository_layer(), &name))
        .import(info.qualified_name(flavor.layer(), &definition.name))
        .extends(format!("{BASE_REPOSITORY}<{}, {key_type}>", definition.name));

    if flavor == EntityFlavor::Persistence {
        builder = builder.import(SPRING_DATA_REPOSITORY);
    }

    for finder in &definition.finders {
        let wrapper = if finder.is_collection { "Stream" } else { "Optional" };
        builder = builder
            .import(if finder.is_collection {
                "java.util.stream.Stream"
            } else {
                "java.util.Optional"
            })
            .method(finder_method(finder, wrapper));
    }
    builder
}

/// `byEmail` → `Optional<Customer> finderByEmail(String string)`.
fn finder_method(finder: &Finder, wrapper: &str) -> MethodDeclaration {
    MethodDeclaration::new(format!("finder{}", upper_first(&finder.name)))
        .returns(format!("{wrapper}<{}>", finder.return_type))
        .parameters(parameters_from_types(&finder.parameters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::hexa_project;
    use crate::domain::Importables;
    use serde_json::json;

    fn customer() -> EntityDefinition {
        EntityDefinition::parse(
            "Customer",
            &json!({
                "fields": { "id": { "type": "Long", "primaryKey": true }, "email": "String" },
                "finders": {
                    "byEmail": { "parameters": ["String"], "return": "Customer", "isCollection": true },
                    "byNameAndCity": { "parameters": ["String", "String"], "return": "Customer" }
                }
            }),
        )
        .unwrap()
    }

    #[test]
    fn domain_repository_extends_the_marker() {
        let artifact = repository_builder(&hexa_project(), &customer(), "Long", EntityFlavor::Model)
            .render(&Importables::new());
        let content = artifact.content();

        assert!(content.starts_with("package com.acme.domain.repository;\n"));
        assert!(content.contains("import com.acme.domain.model.Customer;"));
        assert!(content.contains(
            "public interface CustomerRepository extends Repository<Customer, Long> {"
        ));
        assert!(content.contains("    Stream<Customer> finderByEmail(String string);"));
        assert!(content.contains(
            "    Optional<Customer> finderByNameAndCity(String string, String string2);"
        ));
        assert!(content.contains("import java.util.stream.Stream;"));
        assert!(content.contains("import java.util.Optional;"));
    }

    #[test]
    fn finder_parameters_named_after_types() {
        let finder = Finder {
            name: "byOwnerAndTags".into(),
            parameters: vec!["com.acme.Owner".into(), "List<String>".into(), "Owner".into()],
            return_type: "Pet".into(),
            is_collection: true,
        };
        let method = finder_method(&finder, "Stream");
        let names: Vec<_> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(method.name, "finderByOwnerAndTags");
        assert_eq!(names, vec!["owner", "list", "owner2"]);
    }

    #[test]
    fn persistence_repository_uses_spring_data() {
        let artifact =
            repository_builder(&hexa_project(), &customer(), "Long", EntityFlavor::Persistence)
                .render(&Importables::new());
        let content = artifact.content();
        assert!(content.starts_with("package com.acme.infrastructure.repository;\n"));
        assert!(content.contains("import org.springframework.data.repository.Repository;"));
        assert!(content.contains("import com.acme.infrastructure.entity.Customer;"));
    }

    #[test]
    fn marker_interface() {
        let artifact = base_repository(&hexa_project()).render(&Importables::new());
        assert_eq!(
            artifact.location.path(),
            std::path::PathBuf::from(
                "/work/shop/domain/src/main/java/com/acme/domain/repository/Repository.java"
            )
        );
        assert_eq!(
            artifact.lines,
            vec![
                "package com.acme.domain.repository;",
                "",
                "public interface Repository<T, ID> {",
                "}",
            ]
        );
    }
}
