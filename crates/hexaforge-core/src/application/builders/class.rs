//! Class and interface source files.
//!
//! Configuration is chained and order independent: the rendered file always
//! follows package, imports, annotations, header, fields, constructor,
//! methods, closing brace.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::{
        builders::{preamble, resolve_imports},
        ports::FileSink,
    },
    domain::{
        ArtifactLocation, GeneratedArtifact, Importables, MethodDef, Parameter, SOURCE_EXTENSION,
        SourceSet, text::indent,
    },
    error::HexaforgeResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitKind {
    #[default]
    Class,
    Interface,
}

impl UnitKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
        }
    }
}

// ── Members ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub ty: String,
    pub name: String,
    pub annotations: Vec<String>,
    /// Assigned by the synthesised constructor; rendered `final`.
    pub constructor_param: bool,
    pub static_final: bool,
    pub initializer: Option<String>,
}

impl FieldDeclaration {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            annotations: Vec::new(),
            constructor_param: false,
            static_final: false,
            initializer: None,
        }
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn constructor_param(mut self) -> Self {
        self.constructor_param = true;
        self
    }

    pub fn static_final(mut self) -> Self {
        self.static_final = true;
        self
    }

    pub fn initializer(mut self, expression: impl Into<String>) -> Self {
        self.initializer = Some(expression.into());
        self
    }

    fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.annotations.iter().map(|a| indent(a, 1)).collect();
        let modifiers = if self.static_final {
            "private static final"
        } else if self.constructor_param {
            "private final"
        } else {
            "private"
        };
        let initializer = self
            .initializer
            .as_deref()
            .map(|init| format!(" = {init}"))
            .unwrap_or_default();
        lines.push(indent(
            &format!("{modifiers} {} {}{initializer};", self.ty, self.name),
            1,
        ));
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub default_return: Option<String>,
    pub annotations: Vec<String>,
    pub is_static: bool,
    /// Explicit statements; replaces the generated placeholder body.
    pub body: Vec<String>,
}

impl MethodDeclaration {
    /// A `void` method without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: "void".to_string(),
            default_return: None,
            annotations: Vec::new(),
            is_static: false,
            body: Vec::new(),
        }
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.body.push(statement.into());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn default_return(mut self, expression: impl Into<String>) -> Self {
        self.default_return = Some(expression.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| match &p.annotation {
                Some(annotation) => format!("{annotation} {} {}", p.ty, p.name),
                None => format!("{} {}", p.ty, p.name),
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}({params})", self.return_type, self.name)
    }

    fn render(&self, kind: UnitKind) -> Vec<String> {
        let mut lines: Vec<String> = self.annotations.iter().map(|a| indent(a, 1)).collect();
        match kind {
            UnitKind::Interface => lines.push(indent(&format!("{};", self.signature()), 1)),
            UnitKind::Class => {
                let modifiers = if self.is_static { "public static" } else { "public" };
                lines.push(indent(&format!("{modifiers} {} {{", self.signature()), 1));
                if self.body.is_empty() {
                    lines.push(indent(&self.placeholder_body(), 2));
                } else {
                    lines.extend(self.body.iter().map(|s| indent(s, 2)));
                }
                lines.push(indent("}", 1));
            }
        }
        lines
    }

    fn placeholder_body(&self) -> String {
        if let Some(expression) = &self.default_return {
            return format!("return {expression};");
        }
        match self.return_type.as_str() {
            "void" => "// Not implemented yet".to_string(),
            "boolean" => "return false;".to_string(),
            "byte" | "short" | "int" | "long" | "char" => "return 0;".to_string(),
            "float" | "double" => "return 0.0;".to_string(),
            _ => "return null;".to_string(),
        }
    }
}

impl From<&MethodDef> for MethodDeclaration {
    fn from(def: &MethodDef) -> Self {
        Self {
            name: def.name.clone(),
            parameters: def.parameters.clone(),
            return_type: def.return_type.clone(),
            default_return: def.default_return.clone(),
            annotations: Vec::new(),
            is_static: false,
            body: Vec::new(),
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    name: String,
    kind: UnitKind,
    package: String,
    imports: BTreeSet<String>,
    annotations: Vec<String>,
    extends: Option<String>,
    implements: Vec<String>,
    fields: Vec<FieldDeclaration>,
    methods: Vec<MethodDeclaration>,
    module_path: PathBuf,
    source_set: SourceSet,
    file_name: Option<String>,
}

impl ClassFileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: UnitKind::Class,
            package: String::new(),
            imports: BTreeSet::new(),
            annotations: Vec::new(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            module_path: PathBuf::new(),
            source_set: SourceSet::Main,
            file_name: None,
        }
    }

    /// Interface named `name`.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name).kind(UnitKind::Interface)
    }

    /// Take package, module, source set and file name from `location`.
    pub fn at(mut self, location: ArtifactLocation) -> Self {
        self.package = location.package;
        self.module_path = location.module_path;
        self.source_set = location.source_set;
        self.file_name = Some(location.file_name);
        self
    }

    pub fn kind(mut self, kind: UnitKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn import(mut self, import: impl Into<String>) -> Self {
        self.imports.insert(import.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn extends(mut self, ty: impl Into<String>) -> Self {
        self.extends = Some(ty.into());
        self
    }

    pub fn implements(mut self, ty: impl Into<String>) -> Self {
        self.implements.push(ty.into());
        self
    }

    /// Add a field. A second field with the same name is ignored.
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        if self.fields.iter().any(|f| f.name == field.name) {
            debug!(class = %self.name, field = %field.name, "Duplicate field ignored");
            return self;
        }
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    pub fn module_path(mut self, path: impl AsRef<Path>) -> Self {
        self.module_path = path.as_ref().to_path_buf();
        self
    }

    pub fn source_set(mut self, source_set: SourceSet) -> Self {
        self.source_set = source_set;
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn location(&self) -> ArtifactLocation {
        ArtifactLocation {
            module_path: self.module_path.clone(),
            source_set: self.source_set,
            package: self.package.clone(),
            file_name: self
                .file_name
                .clone()
                .unwrap_or_else(|| format!("{}.{SOURCE_EXTENSION}", self.name)),
        }
    }

    /// Every type expression the file references.
    fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|f| f.ty.as_str())
            .chain(self.methods.iter().flat_map(|m| {
                std::iter::once(m.return_type.as_str())
                    .chain(m.parameters.iter().map(|p| p.ty.as_str()))
            }))
            .chain(self.extends.as_deref())
            .chain(self.implements.iter().map(String::as_str))
    }

    fn header(&self) -> String {
        let mut header = format!("public {} {}", self.kind.keyword(), self.name);
        match self.kind {
            UnitKind::Class => {
                if let Some(parent) = &self.extends {
                    header.push_str(&format!(" extends {parent}"));
                }
                if !self.implements.is_empty() {
                    header.push_str(&format!(" implements {}", self.implements.join(", ")));
                }
            }
            UnitKind::Interface => {
                let parents: Vec<&str> = self
                    .extends
                    .as_deref()
                    .into_iter()
                    .chain(self.implements.iter().map(String::as_str))
                    .collect();
                if !parents.is_empty() {
                    header.push_str(&format!(" extends {}", parents.join(", ")));
                }
            }
        }
        header.push_str(" {");
        header
    }

    /// Constructor over every constructor-param field, in declaration order.
    fn constructor(&self) -> Option<Vec<String>> {
        let params: Vec<&FieldDeclaration> =
            self.fields.iter().filter(|f| f.constructor_param).collect();
        if params.is_empty() || self.kind == UnitKind::Interface {
            return None;
        }
        let signature = params
            .iter()
            .map(|f| format!("{} {}", f.ty, f.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut lines = vec![indent(&format!("public {}({signature}) {{", self.name), 1)];
        lines.extend(
            params
                .iter()
                .map(|f| indent(&format!("this.{0} = {0};", f.name), 2)),
        );
        lines.push(indent("}", 1));
        Some(lines)
    }

    /// Render the file. Pure: nothing is written.
    pub fn render(&self, importables: &Importables) -> GeneratedArtifact {
        let imports = resolve_imports(
            &self.imports,
            self.referenced_types(),
            importables,
            &self.package,
        );
        let mut lines = preamble(&self.package, &imports);
        lines.extend(self.annotations.iter().cloned());
        lines.push(self.header());

        let mut sections: Vec<Vec<String>> = Vec::new();
        if !self.fields.is_empty() {
            sections.push(self.fields.iter().flat_map(FieldDeclaration::render).collect());
        }
        sections.extend(self.constructor());
        sections.extend(self.methods.iter().map(|m| m.render(self.kind)));

        for section in sections {
            lines.push(String::new());
            lines.extend(section);
        }
        lines.push("}".to_string());

        GeneratedArtifact {
            location: self.location(),
            lines,
        }
    }

    /// Render and persist through `sink`.
    pub fn build(&self, importables: &Importables, sink: &dyn FileSink) -> HexaforgeResult<PathBuf> {
        let artifact = self.render(importables);
        let path = sink.write_artifact(&artifact)?;
        debug!(path = %path.display(), lines = artifact.lines.len(), "Source file written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn importables() -> Importables {
        Importables::new()
            .with("List", "java.util.List")
            .with("LocalDate", "java.time.LocalDate")
            .with("BigDecimal", "java.math.BigDecimal")
    }

    #[test]
    fn layout_is_fixed_regardless_of_call_order() {
        let artifact = ClassFileBuilder::new("Customer")
            .field(FieldDeclaration::new("String", "name"))
            .annotation("@Getter")
            .import("lombok.Getter")
            .package("com.acme.domain.model")
            .render(&Importables::new());

        assert_eq!(
            artifact.lines,
            vec![
                "package com.acme.domain.model;",
                "",
                "import lombok.Getter;",
                "",
                "@Getter",
                "public class Customer {",
                "",
                "    private String name;",
                "}",
            ]
        );
    }

    #[test]
    fn repeated_mapped_types_import_once() {
        let artifact = ClassFileBuilder::new("Order")
            .package("com.acme")
            .field(FieldDeclaration::new("LocalDate", "created"))
            .field(FieldDeclaration::new("LocalDate", "shipped"))
            .field(FieldDeclaration::new("List<LocalDate>", "history"))
            .render(&importables());

        let imports: Vec<_> = artifact
            .lines
            .iter()
            .filter(|l| l.starts_with("import "))
            .collect();
        assert_eq!(
            imports,
            vec!["import java.time.LocalDate;", "import java.util.List;"]
        );
    }

    #[test]
    fn constructor_only_when_needed() {
        let plain = ClassFileBuilder::new("A")
            .field(FieldDeclaration::new("String", "x"))
            .render(&Importables::new());
        assert!(!plain.lines.iter().any(|l| l.contains("public A(")));

        let injected = ClassFileBuilder::new("B")
            .field(FieldDeclaration::new("CustomerRepository", "customerRepository").constructor_param())
            .field(FieldDeclaration::new("OrderRepository", "orderRepository").constructor_param())
            .field(FieldDeclaration::new("CustomerRepository", "customerRepository").constructor_param())
            .render(&Importables::new());
        let content = injected.content();
        assert_eq!(content.matches("public B(").count(), 1);
        assert!(content.contains(
            "    public B(CustomerRepository customerRepository, OrderRepository orderRepository) {\n        this.customerRepository = customerRepository;\n        this.orderRepository = orderRepository;\n    }"
        ));
        assert!(content.contains("    private final OrderRepository orderRepository;"));
    }

    #[test]
    fn interface_methods_are_declarations() {
        let artifact = ClassFileBuilder::interface("CustomerRepository")
            .extends("Repository<Customer, Long>")
            .method(
                MethodDeclaration::new("finderByEmail")
                    .returns("Optional<Customer>")
                    .parameter(Parameter::new("String", "string")),
            )
            .render(&Importables::new());
        let content = artifact.content();
        assert!(content.contains("public interface CustomerRepository extends Repository<Customer, Long> {"));
        assert!(content.contains("    Optional<Customer> finderByEmail(String string);\n"));
        assert!(!content.contains("return"));
    }

    #[test]
    fn class_method_bodies() {
        let artifact = ClassFileBuilder::new("Billing")
            .method(MethodDeclaration::new("run"))
            .method(MethodDeclaration::new("total").returns("BigDecimal"))
            .method(MethodDeclaration::new("active").returns("Boolean").default_return("false"))
            .method(MethodDeclaration::new("count").returns("int"))
            .render(&importables());
        let content = artifact.content();
        assert!(content.contains("    public void run() {\n        // Not implemented yet\n    }"));
        assert!(content.contains("    public BigDecimal total() {\n        return null;\n    }"));
        assert!(content.contains("        return false;"));
        assert!(content.contains("    public int count() {\n        return 0;\n    }"));
        assert!(content.contains("import java.math.BigDecimal;"));
    }

    #[test]
    fn annotated_parameters_and_static_fields() {
        let artifact = ClassFileBuilder::new("CustomerController")
            .field(FieldDeclaration::new("long", "serialVersionUID").static_final().initializer("1L"))
            .method(
                MethodDeclaration::new("getCustomer")
                    .annotation("@GetMapping(\"/{id}\")")
                    .returns("CustomerDto")
                    .parameter(Parameter::new("Long", "id").annotated("@PathVariable(\"id\")")),
            )
            .render(&Importables::new());
        let content = artifact.content();
        assert!(content.contains("    private static final long serialVersionUID = 1L;"));
        assert!(content.contains("    @GetMapping(\"/{id}\")\n    public CustomerDto getCustomer(@PathVariable(\"id\") Long id) {"));
    }

    #[test]
    fn static_method_with_statements() {
        let artifact = ClassFileBuilder::new("ShopApplication")
            .method(
                MethodDeclaration::new("main")
                    .static_method()
                    .parameter(Parameter::new("String[]", "args"))
                    .statement("SpringApplication.run(ShopApplication.class, args);"),
            )
            .render(&Importables::new());
        assert!(artifact.content().contains(
            "    public static void main(String[] args) {\n        SpringApplication.run(ShopApplication.class, args);\n    }"
        ));
    }

    #[test]
    fn location_defaults_file_name() {
        let location = ClassFileBuilder::new("Customer")
            .package("com.acme")
            .module_path("/p")
            .location();
        assert_eq!(location.path(), PathBuf::from("/p/src/main/java/com/acme/Customer.java"));
    }
}
