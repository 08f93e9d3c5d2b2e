//! Configuration files from the workspace and explicit paths.

use modelgen::codegen::kinds::Dialect;
use modelgen::config::{ConfigLoader, WORKSPACE_CONFIG_FILE};
use modelgen::error::ConfigError;
use modelgen::logging::{LogFormat, LogOutput};
use std::fs;
use tempfile::TempDir;

#[test]
fn explicit_file_over_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
output = "file"
file = "logs/modelgen.log"

[generation]
terminal = "macos"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.output, LogOutput::File);
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.generation.default_dialect, "JAVA");
    assert_eq!(
        config.generation.user_interface_url,
        "http://localhost:19090/context"
    );
    assert!(config.generation.terminal().unwrap().is_some());
}

#[test]
fn missing_or_invalid_files_fail() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        ConfigLoader::load_from_file(&temp.path().join("absent.toml")),
        Err(ConfigError::Invalid(_))
    ));

    let path = temp.path().join("bad.toml");
    fs::write(&path, "[generation]\ndefault_dialect = \"COBOL\"\n").unwrap();
    assert!(matches!(
        ConfigLoader::load_from_file(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn environment_file_overrides_workspace_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(WORKSPACE_CONFIG_FILE),
        "[generation]\ndefault_dialect = \"KOTLIN\"\nuser_interface_url = \"http://designer:8080\"\n",
    )
    .unwrap();
    let env_dir = temp.path().join("config");
    fs::create_dir_all(&env_dir).unwrap();
    let env_name = std::env::var("MODELGEN_ENV").unwrap_or_else(|_| "development".to_string());
    fs::write(
        env_dir.join(format!("{}.toml", env_name)),
        "[generation]\ndefault_dialect = \"CSHARP\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.generation.dialect().unwrap(), Dialect::CSharp);
    assert_eq!(config.generation.user_interface_url, "http://designer:8080");
}
