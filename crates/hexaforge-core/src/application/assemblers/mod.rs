//! Module assemblers: one build descriptor plus the directory skeleton per
//! module, run once by `create-project`.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod root;
pub mod single;

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        builders::{ClassFileBuilder, MethodDeclaration, PomBuilder},
        configuration::ConfigurationProvider,
        generators::GenerationReport,
        ports::{DocumentStore, FileSink},
    },
    domain::{
        Archetype, ArtifactLocation, DESCRIPTOR_FILE, Dependency, Layer, Parameter, Parent,
        PomModel, ProjectInfo, SOURCE_EXTENSION, SOURCE_LANGUAGE, SourceSet, text::to_pascal_case,
    },
};

pub use application::ApplicationModuleAssembler;
pub use domain::DomainModuleAssembler;
pub use infrastructure::InfrastructureModuleAssembler;
pub use root::RootAssembler;
pub use single::SingleModuleAssembler;

pub const DEFAULT_SPRING_BOOT_VERSION: &str = "3.3.4";
pub const DEFAULT_JAVA_VERSION: &str = "17";
pub const PROJECT_VERSION: &str = "0.0.1-SNAPSHOT";
pub(crate) const SPRING_BOOT_GROUP: &str = "org.springframework.boot";

/// Ports and project data shared by every assembler.
#[derive(Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub info: &'a ProjectInfo,
    pub config: &'a ConfigurationProvider,
    pub sink: &'a dyn FileSink,
    pub store: &'a dyn DocumentStore,
}

impl AssemblyContext<'_> {
    pub fn spring_boot_version(&self) -> String {
        self.config
            .version("spring-boot")
            .unwrap_or(DEFAULT_SPRING_BOOT_VERSION)
            .to_string()
    }

    pub fn java_version(&self) -> String {
        self.config
            .version("java")
            .unwrap_or(DEFAULT_JAVA_VERSION)
            .to_string()
    }

    /// `spring-boot-starter-parent` at the configured version.
    pub fn boot_parent(&self) -> Parent {
        Parent::new(SPRING_BOOT_GROUP, "spring-boot-starter-parent", self.spring_boot_version())
            .relative_path("")
    }

    /// Parent entry pointing at the aggregator.
    pub fn project_parent(&self) -> Parent {
        Parent::new(&self.info.group_id, &self.info.artifact_id, PROJECT_VERSION)
    }

    /// Coordinates of a sibling module.
    pub fn module_dependency(&self, layer_module: &str) -> Dependency {
        Dependency::new(&self.info.group_id, module_artifact_id(self.info, layer_module))
            .version("${project.version}")
    }
}

/// `shop` + `domain` → `shop-domain`.
pub fn module_artifact_id(info: &ProjectInfo, module: &str) -> String {
    format!("{}-{module}", info.artifact_id)
}

pub(crate) fn spring_boot(artifact_id: &str) -> Dependency {
    Dependency::new(SPRING_BOOT_GROUP, artifact_id)
}

/// One module (or the aggregator) of a generated project.
pub trait ModuleAssembler {
    /// Name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Directory the descriptor lands in.
    fn module_path(&self, info: &ProjectInfo) -> PathBuf;

    fn pom(&self, ctx: &AssemblyContext<'_>) -> PomModel;

    /// Layers whose package directories are created.
    fn layers(&self) -> &'static [Layer] {
        &[]
    }

    /// Whether `src/{main,test}/{java,resources}` is created.
    fn has_sources(&self) -> bool {
        true
    }

    /// Source files written with the skeleton.
    fn sources(&self, _ctx: &AssemblyContext<'_>) -> Vec<ClassFileBuilder> {
        Vec::new()
    }

    /// Write descriptor, directories and sources. I/O failures are reported
    /// and the remaining steps still run.
    #[instrument(skip_all, fields(module = self.name()))]
    fn assemble(&self, ctx: &AssemblyContext<'_>) -> GenerationReport {
        let mut report = GenerationReport::new();
        let module_path = self.module_path(ctx.info);

        let poms = PomBuilder::new(ctx.sink, ctx.store, ctx.info.project_root());
        match poms.create_descriptor(&module_path, &self.pom(ctx)) {
            Some(path) => report.written.push(path),
            None => report.fail(
                DESCRIPTOR_FILE,
                ApplicationError::DescriptorUpdate {
                    path: module_path.join(DESCRIPTOR_FILE),
                },
            ),
        }

        if self.has_sources() {
            for dir in source_roots(&module_path) {
                if let Err(e) = ctx.sink.create_dir_all(&dir) {
                    report.fail(self.name(), e);
                }
            }
        }
        for layer in self.layers() {
            let dir = ctx.info.location(*layer, "_").directory();
            debug!(dir = %dir.display(), "Creating package directory");
            if let Err(e) = ctx.sink.create_dir_all(&dir) {
                report.fail(self.name(), e);
            }
        }
        for source in self.sources(ctx) {
            let name = source.location().file_name;
            report.record(&name, source.build(ctx.config.importables(), ctx.sink));
        }
        report
    }
}

fn source_roots(module_path: &Path) -> Vec<PathBuf> {
    [SourceSet::Main, SourceSet::Test]
        .into_iter()
        .flat_map(|set| {
            let base = module_path.join("src").join(set.as_str());
            [base.join(SOURCE_LANGUAGE), base.join("resources")]
        })
        .collect()
}

/// `@SpringBootApplication` entry point in the project's base package.
pub(crate) fn boot_class(info: &ProjectInfo, module_path: PathBuf) -> ClassFileBuilder {
    let name = format!("{}Application", to_pascal_case(&info.artifact_id));
    ClassFileBuilder::new(&name)
        .at(ArtifactLocation {
            module_path,
            source_set: SourceSet::Main,
            package: info.package.clone(),
            file_name: format!("{name}.{SOURCE_EXTENSION}"),
        })
        .import("org.springframework.boot.SpringApplication")
        .import("org.springframework.boot.autoconfigure.SpringBootApplication")
        .annotation("@SpringBootApplication")
        .method(
            MethodDeclaration::new("main")
                .static_method()
                .parameter(Parameter::new("String[]", "args"))
                .statement(format!("SpringApplication.run({name}.class, args);")),
        )
}

/// Assemblers for `archetype`, aggregator first.
pub fn assemblers_for(archetype: Archetype) -> Vec<Box<dyn ModuleAssembler>> {
    if archetype.is_modular() {
        vec![
            Box::new(RootAssembler),
            Box::new(DomainModuleAssembler),
            Box::new(ApplicationModuleAssembler),
            Box::new(InfrastructureModuleAssembler),
        ]
    } else {
        vec![Box::new(SingleModuleAssembler { archetype })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{Recorder, hexa_project};

    #[test]
    fn source_roots_cover_main_and_test() {
        let roots = source_roots(Path::new("/p/domain"));
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/p/domain/src/main/java"),
                PathBuf::from("/p/domain/src/main/resources"),
                PathBuf::from("/p/domain/src/test/java"),
                PathBuf::from("/p/domain/src/test/resources"),
            ]
        );
    }

    #[test]
    fn boot_class_lives_in_base_package() {
        let info = hexa_project();
        let artifact = boot_class(&info, info.infrastructure.clone())
            .render(&crate::domain::Importables::new());
        assert_eq!(
            artifact.location.path(),
            PathBuf::from("/work/shop/infrastructure/src/main/java/com/acme/ShopApplication.java")
        );
        let content = artifact.content();
        assert!(content.contains("@SpringBootApplication\npublic class ShopApplication {"));
        assert!(content.contains("SpringApplication.run(ShopApplication.class, args);"));
    }

    #[test]
    fn hexa_gets_four_assemblers() {
        let names: Vec<_> = assemblers_for(Archetype::Hexa)
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, vec!["root", "domain", "application", "infrastructure"]);
        assert_eq!(assemblers_for(Archetype::Rest).len(), 1);
    }

    #[test]
    fn configured_versions_override_defaults() {
        let info = hexa_project();
        let sink = Recorder::default();
        let mut config = crate::domain::RemoteConfig::default();
        config.versions.insert("spring-boot".into(), "3.2.0".into());
        let provider = ConfigurationProvider::preloaded(config);
        let ctx = AssemblyContext {
            info: &info,
            config: &provider,
            sink: &sink,
            store: &sink,
        };
        assert_eq!(ctx.boot_parent().version, "3.2.0");
        assert_eq!(ctx.java_version(), DEFAULT_JAVA_VERSION);
    }
}
