//! Named pipelines.

use crate::codegen::steps::{
    ContentManifestStep, DataObjectGeneration, DesignerModelGeneration,
    EntityUnitTestGeneration, ModelGeneration, ProjectionGeneration,
    RestResourceUnitTestGeneration, StorageGeneration, ValueObjectGeneration,
};
use crate::pipeline::commands::{
    ArchetypeCommand, BrowserLaunchCommand, CommandResolverStep, DockerPackageCommand,
};
use crate::pipeline::driver::Pipeline;
use crate::template::{Renderer, TemplateProcessingStep};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The pipelines the engine knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    ArchetypeGeneration,
    ProjectGeneration,
    DockerPackage,
    BrowserLaunch,
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::ArchetypeGeneration,
        Task::ProjectGeneration,
        Task::DockerPackage,
        Task::BrowserLaunch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Task::ArchetypeGeneration => "archetype-generation",
            Task::ProjectGeneration => "project-generation",
            Task::DockerPackage => "docker-package",
            Task::BrowserLaunch => "browser-launch",
        }
    }

    /// Compose the task's pipeline. Only project generation renders, so the
    /// renderer is ignored by the command pipelines.
    pub fn pipeline(&self, renderer: Arc<dyn Renderer>) -> Pipeline {
        match self {
            Task::ArchetypeGeneration => Pipeline::builder(self.name())
                .step(CommandResolverStep::new(ArchetypeCommand))
                .build(),
            Task::ProjectGeneration => Pipeline::builder(self.name())
                .step(TemplateProcessingStep::new(ValueObjectGeneration, renderer.clone()))
                .step(TemplateProcessingStep::new(ModelGeneration, renderer.clone()))
                .step(TemplateProcessingStep::new(DataObjectGeneration, renderer.clone()))
                .step(TemplateProcessingStep::new(ProjectionGeneration, renderer.clone()))
                .step(TemplateProcessingStep::new(StorageGeneration, renderer.clone()))
                .step(TemplateProcessingStep::new(
                    RestResourceUnitTestGeneration,
                    renderer.clone(),
                ))
                .step(TemplateProcessingStep::new(EntityUnitTestGeneration, renderer.clone()))
                .step(TemplateProcessingStep::new(DesignerModelGeneration, renderer))
                .step(ContentManifestStep)
                .build(),
            Task::DockerPackage => Pipeline::builder(self.name())
                .step(CommandResolverStep::new(DockerPackageCommand))
                .build(),
            Task::BrowserLaunch => Pipeline::builder(self.name())
                .step(CommandResolverStep::new(BrowserLaunchCommand))
                .build(),
        }
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Task::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| format!("unknown task '{}'", s))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
