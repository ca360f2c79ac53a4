use std::path::PathBuf;

use crate::{
    application::{
        assemblers::{AssemblyContext, ModuleAssembler, module_artifact_id},
        builders::ClassFileBuilder,
        generators::base_repository,
    },
    domain::{Dependency, Layer, ModuleKind, PomModel, ProjectInfo},
};

/// Pure domain module: models, repository contracts and use cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainModuleAssembler;

impl ModuleAssembler for DomainModuleAssembler {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn module_path(&self, info: &ProjectInfo) -> PathBuf {
        info.module_path(ModuleKind::Domain).to_path_buf()
    }

    fn pom(&self, ctx: &AssemblyContext<'_>) -> PomModel {
        PomModel::new(module_artifact_id(ctx.info, "domain"))
            .parent(ctx.project_parent())
            .dependency(Dependency::new("org.mockito", "mockito-core").scope("test"))
            .dependency(Dependency::new("org.projectlombok", "lombok").scope("provided"))
            .dependency(Dependency::new("org.junit.jupiter", "junit-jupiter").scope("test"))
    }

    fn layers(&self) -> &'static [Layer] {
        &[Layer::Model, Layer::Repository, Layer::UseCase]
    }

    fn sources(&self, ctx: &AssemblyContext<'_>) -> Vec<ClassFileBuilder> {
        vec![base_repository(ctx.info)]
    }
}
