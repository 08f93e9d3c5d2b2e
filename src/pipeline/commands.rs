//! Command-resolving steps.
//!
//! These steps only compose command lines; executing them is left to the
//! caller. Each pushes `[terminal init, terminal parameter, command]` onto the
//! context's command buffer. Values come from the context's properties first,
//! then from the project options in its graph.

use crate::codegen::kinds::Deployment;
use crate::context::ExecutionContext;
use crate::error::StepError;
use crate::label::Label;
use crate::pipeline::step::Step;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const DOCKER_IMAGE: &str = "docker.image";
pub const TAG: &str = "tag";
pub const CURRENT_DIRECTORY: &str = "currentDirectory";
pub const TERMINAL: &str = "terminal";
pub const USER_INTERFACE: &str = "user.interface";
pub const HOME_DIRECTORY: &str = "home.directory";

pub const DEFAULT_TAG: &str = "latest";
pub const DEFAULT_USER_INTERFACE_URL: &str = "http://localhost:19090/context";

pub const ARCHETYPE_GROUP_ID: &str = "io.vlingo";
pub const ARCHETYPE_VERSION: &str = "1.0";

/// Host shell used to launch resolved commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
}

impl Terminal {
    /// Terminal of the running host. Anything that is neither Windows nor
    /// macOS is driven like Linux.
    pub fn supported() -> Self {
        match std::env::consts::OS {
            "windows" => Terminal::Windows,
            "macos" => Terminal::MacOs,
            _ => Terminal::Linux,
        }
    }

    /// Terminal named by the context's `terminal` property, else the host's.
    pub fn for_context(context: &ExecutionContext) -> Result<Self, StepError> {
        match context.property(TERMINAL) {
            Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(StepError::Invalid),
            _ => Ok(Self::supported()),
        }
    }

    pub fn initialization_command(&self) -> &'static str {
        match self {
            Terminal::Windows => "cmd.exe",
            Terminal::MacOs | Terminal::Linux => "sh",
        }
    }

    pub fn parameter(&self) -> &'static str {
        match self {
            Terminal::Windows => "/c",
            Terminal::MacOs | Terminal::Linux => "-c",
        }
    }

    pub fn path_separator(&self) -> char {
        match self {
            Terminal::Windows => '\\',
            Terminal::MacOs | Terminal::Linux => '/',
        }
    }

    pub fn browser_launch_command(&self) -> &'static str {
        match self {
            Terminal::Windows => "start",
            Terminal::MacOs => "open",
            Terminal::Linux => "xdg-open",
        }
    }
}

impl FromStr for Terminal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(Terminal::Windows),
            "macos" | "mac_os" | "mac" => Ok(Terminal::MacOs),
            "linux" => Ok(Terminal::Linux),
            other => Err(format!("unsupported terminal '{}'", other)),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terminal::Windows => "windows",
            Terminal::MacOs => "macos",
            Terminal::Linux => "linux",
        };
        f.write_str(name)
    }
}

/// Property `key`, else the text of the graph's `label` root. Blank values
/// count as absent.
fn setting(context: &ExecutionContext, key: &str, label: Label) -> Result<Option<String>, StepError> {
    if let Some(value) = context.property(key).filter(|v| !v.trim().is_empty()) {
        return Ok(Some(value.to_string()));
    }
    if context.graph().has_node(label) {
        let value = context.graph().value_of(label)?;
        if !value.trim().is_empty() {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn require_setting(context: &ExecutionContext, key: &str, label: Label) -> Result<String, StepError> {
    setting(context, key, label)?.ok_or_else(|| StepError::MissingProperty(key.to_string()))
}

/// Composes one command line from the context
pub trait CommandResolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn format_command(&self, context: &ExecutionContext, terminal: Terminal) -> Result<String, StepError>;
}

/// Step adapter pushing a resolver's command behind the terminal prefix
pub struct CommandResolverStep<R> {
    resolver: R,
}

impl<R: CommandResolver> CommandResolverStep<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: CommandResolver> Step for CommandResolverStep<R> {
    fn name(&self) -> &str {
        self.resolver.name()
    }

    fn process(&self, context: &mut ExecutionContext) -> Result<(), StepError> {
        let terminal = Terminal::for_context(context)?;
        let command = self.resolver.format_command(context, terminal)?;
        debug!(%terminal, command = %command, "Command resolved");
        context.push_command(terminal.initialization_command());
        context.push_command(terminal.parameter());
        context.push_command(command);
        Ok(())
    }
}

/// `cd {dir} && mvn clean package && docker build ./ -t {image}:{tag}`
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerPackageCommand;

impl CommandResolver for DockerPackageCommand {
    fn name(&self) -> &'static str {
        "docker_package_command_resolver"
    }

    fn format_command(&self, context: &ExecutionContext, _terminal: Terminal) -> Result<String, StepError> {
        let image = require_setting(context, DOCKER_IMAGE, Label::DockerImage)?;
        let tag = setting(context, TAG, Label::Tag)?.unwrap_or_else(|| DEFAULT_TAG.to_string());
        let directory = require_setting(context, CURRENT_DIRECTORY, Label::CurrentDirectory)?;
        Ok(format!(
            "cd {} && mvn clean package && docker build ./ -t {}:{}",
            directory, image, tag
        ))
    }
}

/// `{open} {user interface url}`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLaunchCommand;

impl CommandResolver for BrowserLaunchCommand {
    fn name(&self) -> &'static str {
        "browser_launch_command_resolver"
    }

    fn format_command(&self, context: &ExecutionContext, terminal: Terminal) -> Result<String, StepError> {
        let url = context
            .property(USER_INTERFACE)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_USER_INTERFACE_URL);
        Ok(format!("{} {}", terminal.browser_launch_command(), url))
    }
}

/// `mvnw archetype:generate` for the project's deployment archetype, run from
/// `{home}/resources/archetypes` after installing the archetype itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchetypeCommand;

impl ArchetypeCommand {
    /// `-Dkey=value` arguments in the order Maven receives them.
    fn arguments(context: &ExecutionContext, deployment: Deployment) -> Result<Vec<(&'static str, String)>, StepError> {
        let graph = context.graph();
        let package = graph.value_of(Label::Package)?;
        let main_class = graph.value_of_or(
            Label::MainClass,
            &format!("{}.infrastructure.Bootstrap", package),
        )?;

        let mut arguments = vec![
            ("archetypeCatalog", "internal".to_string()),
            ("archetypeGroupId", ARCHETYPE_GROUP_ID.to_string()),
            (
                "archetypeArtifactId",
                format!("vlingo-xoom-{}-archetype", deployment.archetype()),
            ),
            ("archetypeVersion", ARCHETYPE_VERSION.to_string()),
            ("version", graph.value_of(Label::ArtifactVersion)?),
            ("groupId", graph.value_of(Label::GroupId)?),
            ("artifactId", graph.value_of(Label::ArtifactId)?),
            ("mainClass", main_class),
            ("package", package),
            ("vlingoXoomVersion", graph.value_of(Label::XoomVersion)?),
        ];
        if deployment.uses_docker() {
            arguments.push((
                "dockerImage",
                require_setting(context, DOCKER_IMAGE, Label::DockerImage)?,
            ));
        }
        if deployment.uses_kubernetes() {
            arguments.push(("k8sPodName", graph.value_of(Label::KubernetesPodName)?));
            arguments.push(("k8sImage", graph.value_of(Label::KubernetesImage)?));
        }
        Ok(arguments)
    }
}

/// Drive prefix (`D:`) of a Windows path.
fn drive_of(path: &str) -> Option<&str> {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(&path[..2]),
        _ => None,
    }
}

impl CommandResolver for ArchetypeCommand {
    fn name(&self) -> &'static str {
        "archetype_command_resolver"
    }

    fn format_command(&self, context: &ExecutionContext, terminal: Terminal) -> Result<String, StepError> {
        let deployment = context
            .graph()
            .value_as_or(Label::Deployment, Deployment::None)?;
        let arguments: String = Self::arguments(context, deployment)?
            .iter()
            .map(|(key, value)| format!("-D{}={} ", key, value))
            .collect();

        let separator = terminal.path_separator();
        let home = context.require_property(HOME_DIRECTORY)?;
        let folder = format!(
            "{home}{sep}resources{sep}archetypes",
            home = home.trim_end_matches(['/', '\\']),
            sep = separator
        );
        let archetype = format!("{}-archetype", deployment.archetype());

        let command = match terminal {
            Terminal::Windows => {
                let build = format!(
                    "cd {} && mvnw.cmd -f {}{}pom.xml clean install && mvnw.cmd archetype:generate -B {}",
                    folder, archetype, separator, arguments
                );
                match drive_of(&folder) {
                    Some(drive) => format!("{} && {}", drive, build),
                    None => build,
                }
            }
            Terminal::MacOs | Terminal::Linux => format!(
                "cd {} && ./mvnw -f ./{}/pom.xml clean install && ./mvnw archetype:generate -B {}",
                folder, archetype, arguments
            ),
        };
        Ok(command)
    }
}

pub type ArchetypeCommandResolverStep = CommandResolverStep<ArchetypeCommand>;
pub type DockerPackageCommandResolverStep = CommandResolverStep<DockerPackageCommand>;
pub type BrowserLaunchCommandResolverStep = CommandResolverStep<BrowserLaunchCommand>;
