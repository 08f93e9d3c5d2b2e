//! CLI route: one handler per command, each building a context and running
//! the matching task pipeline.

use crate::catalog::Catalog;
use crate::cli::presentation::{format_commands, format_contents};
use crate::cli::{Commands, OutputFormat};
use crate::config::ModelgenConfig;
use crate::context::{ExecutionContext, GenerationBundle};
use crate::pipeline::commands::{
    CURRENT_DIRECTORY, DOCKER_IMAGE, HOME_DIRECTORY, TAG, TERMINAL, USER_INTERFACE,
};
use crate::pipeline::Task;
use crate::settings::GenerationSettings;
use crate::template::{JsonRenderer, Renderer};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Everything a command needs: the workspace, its configuration and the renderer.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ModelgenConfig,
    renderer: Arc<dyn Renderer>,
}

impl RunContext {
    pub fn with_config(workspace_root: PathBuf, config: ModelgenConfig) -> Self {
        Self {
            workspace_root,
            config,
            renderer: Arc::new(JsonRenderer::new()),
        }
    }

    /// Swap the rendering collaborator.
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &ModelgenConfig {
        &self.config
    }

    #[instrument(skip_all, fields(command = command.name()))]
    pub fn execute(&self, command: &Commands) -> Result<String> {
        let started = Instant::now();
        let output = match command {
            Commands::Generate { settings, format } => self.generate(settings, *format),
            Commands::Archetype { settings, home } => self.archetype(settings, home.as_deref()),
            Commands::DockerPackage {
                image,
                tag,
                directory,
            } => self.docker_package(image, tag.as_deref(), directory.as_deref()),
            Commands::BrowserLaunch { url } => self.browser_launch(url.as_deref()),
        }?;
        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Command completed"
        );
        Ok(output)
    }

    fn run(&self, task: Task, mut context: ExecutionContext) -> Result<GenerationBundle> {
        task.pipeline(Arc::clone(&self.renderer))
            .run(&mut context)
            .with_context(|| format!("Task '{}' failed", task))?;
        Ok(context.into_bundle()?)
    }

    /// Context over the graph of a settings file, relative to the workspace.
    fn settings_context(&self, settings_path: &Path) -> Result<ExecutionContext> {
        let path = self.workspace_root.join(settings_path);
        let mut settings = GenerationSettings::load(&path)
            .with_context(|| format!("Cannot load settings from {}", path.display()))?;
        if settings.context.dialect.is_none() {
            settings.context.dialect = Some(self.config.generation.default_dialect.clone());
        }

        let catalog = Catalog::shared();
        let graph = settings.to_graph(&catalog.taxonomy)?;
        Ok(ExecutionContext::new(catalog, graph))
    }

    fn generate(&self, settings_path: &Path, format: OutputFormat) -> Result<String> {
        let context = self.settings_context(settings_path)?;
        let bundle = self.run(Task::ProjectGeneration, context)?;
        info!(contents = bundle.contents.len(), "Project generated");
        Ok(format_contents(&bundle.contents, format)?)
    }

    fn archetype(&self, settings_path: &Path, home: Option<&Path>) -> Result<String> {
        let home = home
            .map(|h| self.workspace_root.join(h))
            .unwrap_or_else(|| self.workspace_root.clone());
        let mut context = self.settings_context(settings_path)?;
        context.set_property(HOME_DIRECTORY, home.display().to_string());
        if let Some((key, terminal)) = self.terminal_property() {
            context.set_property(key, terminal);
        }

        let bundle = self.run(Task::ArchetypeGeneration, context)?;
        Ok(format_commands(&bundle.commands))
    }

    fn docker_package(&self, image: &str, tag: Option<&str>, directory: Option<&Path>) -> Result<String> {
        let directory = directory
            .map(|d| self.workspace_root.join(d))
            .unwrap_or_else(|| self.workspace_root.clone());
        let mut properties = vec![
            (DOCKER_IMAGE, image.to_string()),
            (CURRENT_DIRECTORY, directory.display().to_string()),
        ];
        if let Some(tag) = tag {
            properties.push((TAG, tag.to_string()));
        }
        properties.extend(self.terminal_property());

        let bundle = self.run(
            Task::DockerPackage,
            ExecutionContext::with_properties(Catalog::shared(), properties),
        )?;
        Ok(format_commands(&bundle.commands))
    }

    fn browser_launch(&self, url: Option<&str>) -> Result<String> {
        let url = url.unwrap_or(&self.config.generation.user_interface_url);
        let mut properties = vec![(USER_INTERFACE, url.to_string())];
        properties.extend(self.terminal_property());

        let bundle = self.run(
            Task::BrowserLaunch,
            ExecutionContext::with_properties(Catalog::shared(), properties),
        )?;
        Ok(format_commands(&bundle.commands))
    }

    fn terminal_property(&self) -> Option<(&'static str, String)> {
        self.config
            .generation
            .terminal
            .clone()
            .map(|terminal| (TERMINAL, terminal))
    }
}
