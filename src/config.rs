//! Configuration
//!
//! Layered runtime configuration for the command-line tool: built-in defaults,
//! the user config file, the workspace `modelgen.toml`, an environment-specific
//! `config/{MODELGEN_ENV}.toml` and finally `MODELGEN__*` environment variables.

use crate::codegen::kinds::Dialect;
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::pipeline::commands::DEFAULT_USER_INTERFACE_URL;
use crate::pipeline::Terminal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelgenConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Defaults applied to generation requests and command tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Dialect used when a settings file names none
    #[serde(default = "default_dialect")]
    pub default_dialect: String,

    /// Terminal used to launch commands; the host's when unset
    #[serde(default)]
    pub terminal: Option<String>,

    #[serde(default = "default_user_interface_url")]
    pub user_interface_url: String,
}

fn default_dialect() -> String {
    "JAVA".to_string()
}

fn default_user_interface_url() -> String {
    DEFAULT_USER_INTERFACE_URL.to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_dialect: default_dialect(),
            terminal: None,
            user_interface_url: default_user_interface_url(),
        }
    }
}

impl GenerationConfig {
    pub fn dialect(&self) -> Result<Dialect, ConfigError> {
        self.default_dialect.parse().map_err(ConfigError::Invalid)
    }

    pub fn terminal(&self) -> Result<Option<Terminal>, ConfigError> {
        self.terminal
            .as_deref()
            .map(|raw| raw.parse().map_err(ConfigError::Invalid))
            .transpose()
    }
}

impl ModelgenConfig {
    /// Check every value that is only parsed later, so bad settings fail at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.dialect()?;
        self.generation.terminal()?;

        let url = self.generation.user_interface_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "generation.user_interface_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Builds a [`ModelgenConfig`] from its sources
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the full source stack for a workspace.
    pub fn load(workspace_root: &Path) -> Result<ModelgenConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder);
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root);
        let builder = sources::add_environment(builder);

        let config: ModelgenConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load one explicit file over the defaults, ignoring every other source.
    pub fn load_from_file(path: &Path) -> Result<ModelgenConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::Invalid(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config: ModelgenConfig = merge::builder_with_defaults()?
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_config_path()
    }
}
