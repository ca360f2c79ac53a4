use std::path::PathBuf;

use crate::{
    application::{
        assemblers::{
            AssemblyContext, ModuleAssembler, SPRING_BOOT_GROUP, boot_class, module_artifact_id,
            spring_boot,
        },
        builders::ClassFileBuilder,
    },
    domain::{Dependency, Layer, ModuleKind, Plugin, PomModel, ProjectInfo},
};

/// Adapters module: persistence, REST, configuration and the boot class.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfrastructureModuleAssembler;

impl ModuleAssembler for InfrastructureModuleAssembler {
    fn name(&self) -> &'static str {
        "infrastructure"
    }

    fn module_path(&self, info: &ProjectInfo) -> PathBuf {
        info.module_path(ModuleKind::Infrastructure).to_path_buf()
    }

    fn pom(&self, ctx: &AssemblyContext<'_>) -> PomModel {
        PomModel::new(module_artifact_id(ctx.info, "infrastructure"))
            .parent(ctx.project_parent())
            .dependency(ctx.module_dependency("domain"))
            .dependency(ctx.module_dependency("application"))
            .dependency(spring_boot("spring-boot-starter-web"))
            .dependency(spring_boot("spring-boot-starter-data-jpa"))
            .dependency(Dependency::new("org.projectlombok", "lombok").scope("provided"))
            .dependency(spring_boot("spring-boot-starter-test").scope("test"))
            .plugin(Plugin::new(SPRING_BOOT_GROUP, "spring-boot-maven-plugin"))
    }

    fn layers(&self) -> &'static [Layer] {
        &[
            Layer::Entity,
            Layer::PersistenceRepository,
            Layer::Rest,
            Layer::RestDto,
            Layer::Config,
        ]
    }

    fn sources(&self, ctx: &AssemblyContext<'_>) -> Vec<ClassFileBuilder> {
        vec![boot_class(ctx.info, self.module_path(ctx.info))]
    }
}
