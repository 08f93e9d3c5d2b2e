//! Workspace config files: `modelgen.toml`, then `config/{MODELGEN_ENV}.toml`.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "modelgen.toml";
pub const ENV_VAR: &str = "MODELGEN_ENV";

pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let base = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if base.is_file() {
        builder = builder.add_source(File::from(base).required(false));
    }

    let env_name = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
    let env_file = workspace_root
        .join("config")
        .join(format!("{}.toml", env_name));
    if env_file.is_file() {
        builder = builder.add_source(File::from(env_file).required(false));
    }
    builder
}
