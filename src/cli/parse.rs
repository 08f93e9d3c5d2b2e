//! CLI parse: clap types for modelgen. Definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// modelgen - generate project sources from a domain-model description
#[derive(Debug, Parser)]
#[command(name = "modelgen", version)]
#[command(about = "Generate project sources from a labeled domain-model description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces the layered config sources)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path when the output is a file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run project generation for a settings file (JSON or TOML)
    Generate {
        /// Settings file describing the project and its model
        settings: PathBuf,

        /// Output format (text or json)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Resolve the command that generates the project skeleton from its archetype
    Archetype {
        /// Settings file describing the project
        settings: PathBuf,

        /// Starter home holding resources/archetypes (default: the workspace root)
        #[arg(long)]
        home: Option<PathBuf>,
    },
    /// Resolve the command that packages the project as a docker image
    DockerPackage {
        /// Image name
        #[arg(long)]
        image: String,

        /// Image tag (default: latest)
        #[arg(long)]
        tag: Option<String>,

        /// Project directory (default: the workspace root)
        #[arg(long)]
        directory: Option<PathBuf>,
    },
    /// Resolve the command that opens the designer user interface
    BrowserLaunch {
        /// User interface address (default: from configuration)
        #[arg(long)]
        url: Option<String>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Generate { .. } => "generate",
            Commands::Archetype { .. } => "archetype",
            Commands::DockerPackage { .. } => "docker-package",
            Commands::BrowserLaunch { .. } => "browser-launch",
        }
    }
}
