use std::path::PathBuf;

use crate::{
    application::{
        assemblers::{
            AssemblyContext, ModuleAssembler, PROJECT_VERSION, SPRING_BOOT_GROUP, boot_class,
            spring_boot,
        },
        builders::ClassFileBuilder,
        generators::base_repository,
    },
    domain::{Archetype, Dependency, Layer, ModuleKind, Plugin, PomModel, ProjectInfo},
};

pub const DEFAULT_JOINFACES_VERSION: &str = "5.3.0";

/// Every layer in one module, for the MVC, JSF and REST archetypes.
#[derive(Debug, Clone, Copy)]
pub struct SingleModuleAssembler {
    pub archetype: Archetype,
}

impl SingleModuleAssembler {
    fn starters(&self, ctx: &AssemblyContext<'_>) -> Vec<Dependency> {
        let mut starters = vec![
            spring_boot("spring-boot-starter-web"),
            spring_boot("spring-boot-starter-data-jpa"),
        ];
        match self.archetype {
            Archetype::Mvc => starters.push(spring_boot("spring-boot-starter-thymeleaf")),
            Archetype::Jsf => {
                let joinfaces = ctx
                    .config
                    .version("joinfaces")
                    .unwrap_or(DEFAULT_JOINFACES_VERSION);
                starters.push(
                    Dependency::new("org.joinfaces", "faces-spring-boot-starter").version(joinfaces),
                );
                starters.push(spring_boot("spring-boot-starter-tomcat").scope("provided"));
            }
            Archetype::Rest | Archetype::Hexa => {}
        }
        starters
    }
}

impl ModuleAssembler for SingleModuleAssembler {
    fn name(&self) -> &'static str {
        "single"
    }

    fn module_path(&self, info: &ProjectInfo) -> PathBuf {
        info.module_path(ModuleKind::Domain).to_path_buf()
    }

    fn pom(&self, ctx: &AssemblyContext<'_>) -> PomModel {
        let pom = PomModel::new(&ctx.info.artifact_id)
            .parent(ctx.boot_parent())
            .group_id(&ctx.info.group_id)
            .version(PROJECT_VERSION)
            .packaging(self.archetype.packaging());
        self.starters(ctx)
            .into_iter()
            .fold(pom, PomModel::dependency)
            .dependency(Dependency::new("org.projectlombok", "lombok").scope("provided"))
            .dependency(spring_boot("spring-boot-starter-test").scope("test"))
            .property("java.version", ctx.java_version())
            .property("project.build.sourceEncoding", "UTF-8")
            .plugin(Plugin::new(SPRING_BOOT_GROUP, "spring-boot-maven-plugin"))
    }

    fn layers(&self) -> &'static [Layer] {
        &[
            Layer::Model,
            Layer::Repository,
            Layer::UseCase,
            Layer::Service,
            Layer::Entity,
            Layer::Rest,
            Layer::RestDto,
        ]
    }

    fn sources(&self, ctx: &AssemblyContext<'_>) -> Vec<ClassFileBuilder> {
        vec![
            base_repository(ctx.info),
            boot_class(ctx.info, self.module_path(ctx.info)),
        ]
    }
}
