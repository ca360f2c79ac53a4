use std::path::PathBuf;

use crate::{
    application::assemblers::{AssemblyContext, ModuleAssembler, PROJECT_VERSION},
    domain::{ModuleKind, PomModel, ProjectInfo},
};

/// Aggregator descriptor at the project root.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootAssembler;

impl ModuleAssembler for RootAssembler {
    fn name(&self) -> &'static str {
        "root"
    }

    fn module_path(&self, info: &ProjectInfo) -> PathBuf {
        info.project_root().to_path_buf()
    }

    fn has_sources(&self) -> bool {
        false
    }

    fn pom(&self, ctx: &AssemblyContext<'_>) -> PomModel {
        ModuleKind::ALL.iter().fold(
            PomModel::new(&ctx.info.artifact_id)
                .parent(ctx.boot_parent())
                .group_id(&ctx.info.group_id)
                .version(PROJECT_VERSION)
                .packaging("pom")
                .property("java.version", ctx.java_version())
                .property("project.build.sourceEncoding", "UTF-8"),
            |pom, kind| pom.module(kind.as_str()),
        )
    }
}
