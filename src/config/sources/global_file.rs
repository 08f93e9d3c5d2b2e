//! User config file: `$XDG_CONFIG_HOME/modelgen/config.toml`, else the
//! platform config directory.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use directories::BaseDirs;
use std::path::PathBuf;
use tracing::debug;

pub fn global_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => BaseDirs::new()?.config_dir().to_path_buf(),
    };
    Some(base.join("modelgen").join("config.toml"))
}

/// Add the user config file when it exists.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) if path.is_file() => {
            debug!(config_path = %path.display(), "Using user configuration");
            builder.add_source(File::from(path).required(false))
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No user configuration file");
            builder
        }
        None => builder,
    }
}
