use std::path::PathBuf;

use crate::{
    application::assemblers::{AssemblyContext, ModuleAssembler, module_artifact_id},
    domain::{Dependency, Layer, ModuleKind, PomModel, ProjectInfo},
};

/// Application services on top of the domain module.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationModuleAssembler;

impl ModuleAssembler for ApplicationModuleAssembler {
    fn name(&self) -> &'static str {
        "application"
    }

    fn module_path(&self, info: &ProjectInfo) -> PathBuf {
        info.module_path(ModuleKind::Application).to_path_buf()
    }

    fn pom(&self, ctx: &AssemblyContext<'_>) -> PomModel {
        PomModel::new(module_artifact_id(ctx.info, "application"))
            .parent(ctx.project_parent())
            .dependency(ctx.module_dependency("domain"))
            .dependency(Dependency::new("org.springframework", "spring-context"))
    }

    fn layers(&self) -> &'static [Layer] {
        &[Layer::Service]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        configuration::ConfigurationProvider,
        test_support::{Recorder, hexa_project},
    };

    #[test]
    fn depends_on_domain_and_spring_context() {
        let info = hexa_project();
        let sink = Recorder::default();
        let config = ConfigurationProvider::offline();
        let ctx = AssemblyContext {
            info: &info,
            config: &config,
            sink: &sink,
            store: &sink,
        };
        ApplicationModuleAssembler.assemble(&ctx);

        let document = sink.document("/work/shop/application/pom.xml").unwrap();
        let dependencies = document.find_elements("project/dependencies/dependency");
        assert_eq!(dependencies[0].child_text("artifactId"), Some("shop-domain"));
        assert_eq!(dependencies[0].child_text("version"), Some("${project.version}"));
        assert_eq!(dependencies[1].child_text("artifactId"), Some("spring-context"));
        assert!(sink.has_dir("/work/shop/application/src/main/java/com/acme/application/service"));
    }
}
