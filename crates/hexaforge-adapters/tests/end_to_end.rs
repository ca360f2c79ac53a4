//! Project creation and generation against a real temporary directory.

use std::path::Path;

use hexaforge_adapters::{LocalFileSink, MemoryFileSink, OpenApiSchemaSource, XmlDocumentStore};
use hexaforge_core::{domain::Dependency, prelude::*};
use serde_json::json;

fn offline_with_h2() -> ConfigurationProvider {
    let mut config = RemoteConfig::default();
    config.databases.insert(
        "h2".into(),
        Dependency::new("com.h2database", "h2").scope("runtime"),
    );
    ConfigurationProvider::preloaded(config)
}

fn create(base: &Path, archetype: Archetype) -> ProjectInfo {
    let service = ProjectService::new(
        Box::new(LocalFileSink::new()),
        Box::new(XmlDocumentStore::new()),
        ConfigurationProvider::offline(),
    );
    let request = CreateProjectRequest::new("shop", base)
        .archetype(archetype)
        .group_id("com.acme")
        .package("com.acme");
    let created = service.create_project(&request).unwrap();
    assert!(created.report.is_success(), "{:?}", created.report.errors);
    created.info
}

fn generator(info: ProjectInfo) -> GenerationService {
    GenerationService::new(
        info,
        Box::new(LocalFileSink::new()),
        Box::new(XmlDocumentStore::new()),
        offline_with_h2(),
    )
}

#[test]
fn hexa_project_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    create(dir.path(), Archetype::Hexa);
    let root = dir.path().join("shop");

    let pom = std::fs::read_to_string(root.join("pom.xml")).unwrap();
    assert!(pom.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project"));
    assert!(pom.contains("    <packaging>pom</packaging>\n"));
    assert!(pom.contains("        <module>infrastructure</module>\n"));
    for module in ["domain", "application", "infrastructure"] {
        assert!(root.join(module).join("pom.xml").is_file());
        assert!(root.join(module).join("src/test/resources").is_dir());
    }
    assert!(root.join("domain/src/main/java/com/acme/domain/usecase").is_dir());
    assert!(root
        .join("domain/src/main/java/com/acme/domain/repository/Repository.java")
        .is_file());
    assert!(root
        .join("infrastructure/src/main/java/com/acme/ShopApplication.java")
        .is_file());

    let info: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("project_info.json")).unwrap())
            .unwrap();
    assert_eq!(info["artifactId"], "shop");
}

#[test]
fn entities_server_and_database_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let info = create(dir.path(), Archetype::Hexa);
    let root = info.project_root().to_path_buf();
    let service = generator(info);

    let definitions = dir.path().join("entities.json");
    std::fs::write(
        &definitions,
        json!({
            "Customer": {
                "table": "customers",
                "fields": {
                    "id": {"type": "Long", "primaryKey": true},
                    "email": {"type": "String", "nullable": false, "unique": true}
                }
            },
            "Broken": {"fields": {"name": "String"}}
        })
        .to_string(),
    )
    .unwrap();

    let report = service.add_entities(&service.load_definitions(&definitions).unwrap());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].artifact, "Broken");

    let entity = std::fs::read_to_string(
        root.join("infrastructure/src/main/java/com/acme/infrastructure/entity/Customer.java"),
    )
    .unwrap();
    assert!(entity.contains("@Table(name = \"customers\")"));
    assert!(root
        .join("infrastructure/src/main/java/com/acme/infrastructure/repository/CustomerRepository.java")
        .is_file());
    assert!(!root
        .join("infrastructure/src/main/java/com/acme/infrastructure/entity/Broken.java")
        .exists());

    service.set_server(Server::Jetty).unwrap();
    service.add_database("h2").unwrap();
    assert!(service.add_database("db2").is_err());

    let pom = std::fs::read_to_string(root.join("infrastructure/pom.xml")).unwrap();
    assert!(pom.contains("<artifactId>spring-boot-starter-jetty</artifactId>"));
    assert!(pom.contains("<server.type>jetty</server.type>"));
    assert_eq!(pom.matches("<artifactId>h2</artifactId>").count(), 1);
}

#[test]
fn rest_adapter_from_openapi_file() {
    let dir = tempfile::tempdir().unwrap();
    let info = create(dir.path(), Archetype::Rest);
    let root = info.project_root().to_path_buf();
    let service = generator(info);

    let api = dir.path().join("api.json");
    std::fs::write(
        &api,
        json!({
            "openapi": "3.0.3",
            "info": {"title": "Orders", "version": "1.0.0"},
            "paths": {"/orders/{id}": {"get": {
                "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}],
                "responses": {"200": {"description": "OK", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Order"}}}}}
            }}},
            "components": {"schemas": {"Order": {"type": "object", "properties": {"total": {"type": "number"}}}}}
        })
        .to_string(),
    )
    .unwrap();

    let source = OpenApiSchemaSource::from_path(&LocalFileSink::new(), &api).unwrap();
    let report = service.add_rest_adapter(&source);
    assert!(report.is_success());

    let controller =
        std::fs::read_to_string(root.join("src/main/java/com/acme/rest/OrdersController.java"))
            .unwrap();
    assert!(controller.contains("public Order getOrdersById(@PathVariable(\"id\") Long id) {"));
    let dto = std::fs::read_to_string(root.join("src/main/java/com/acme/rest/dto/Order.java"))
        .unwrap();
    assert!(dto.contains("public record Order(\n    Double total\n) {\n}"));
}

#[test]
fn rest_adapter_from_yaml_request_body() {
    let dir = tempfile::tempdir().unwrap();
    let info = create(dir.path(), Archetype::Rest);
    let root = info.project_root().to_path_buf();
    let service = generator(info);

    let api = dir.path().join("api.yml");
    std::fs::write(
        &api,
        "openapi: 3.0.3
info:
  title: Orders
  version: '1.0.0'
paths:
  /orders:
    post:
      operationId: placeOrder
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/NewOrder'
      responses:
        '202':
          description: Accepted
components:
  schemas:
    NewOrder:
      type: object
      properties:
        sku:
          type: string
        quantity:
          type: integer
",
    )
    .unwrap();

    let source = OpenApiSchemaSource::from_path(&LocalFileSink::new(), &api).unwrap();
    let report = service.add_rest_adapter(&source);
    assert!(report.is_success(), "{:?}", report.errors);

    let controller =
        std::fs::read_to_string(root.join("src/main/java/com/acme/rest/OrdersController.java"))
            .unwrap();
    assert!(controller.contains("import com.acme.rest.dto.NewOrder;"));
    assert!(controller.contains("public void placeOrder(@RequestBody NewOrder body) {"));
    let dto = std::fs::read_to_string(root.join("src/main/java/com/acme/rest/dto/NewOrder.java"))
        .unwrap();
    assert!(dto.contains("public record NewOrder(\n    Integer quantity,\n    String sku\n) {\n}"));
}

#[test]
fn memory_sink_backs_the_document_store() {
    let sink = MemoryFileSink::new();
    let service = ProjectService::new(
        Box::new(sink.clone()),
        Box::new(XmlDocumentStore::with_sink(sink.clone())),
        ConfigurationProvider::offline(),
    );
    service
        .create_project(&CreateProjectRequest::new("shop", "/mem").archetype(Archetype::Jsf))
        .unwrap();

    let pom = sink.read_file("/mem/shop/pom.xml").unwrap();
    assert!(pom.contains("<packaging>war</packaging>"));
    assert!(pom.contains("<artifactId>faces-spring-boot-starter</artifactId>"));
}
