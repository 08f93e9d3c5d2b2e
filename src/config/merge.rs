//! Merge rules: built-in defaults at the bottom of the precedence stack.

use crate::pipeline::commands::DEFAULT_USER_INTERFACE_URL;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// A config builder seeded with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("generation.default_dialect", "JAVA")?
        .set_default("generation.user_interface_url", DEFAULT_USER_INTERFACE_URL)
}
