//! modelgen CLI binary

use anyhow::{Context, Result};
use clap::Parser;
use modelgen::cli::{Cli, RunContext};
use modelgen::config::{ConfigLoader, ModelgenConfig};
use modelgen::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    let logging = match build_logging_config(&cli, &config) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(2);
        }
    };
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(command = cli.command.name(), "modelgen starting");
    let context = RunContext::with_config(cli.workspace.clone(), config);
    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<ModelgenConfig> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Cannot load configuration {}", path.display())),
        None => ConfigLoader::load(&cli.workspace).context("Cannot load configuration"),
    }
}

/// Command-line flags win over the loaded configuration.
fn build_logging_config(cli: &Cli, config: &ModelgenConfig) -> Result<LoggingConfig> {
    let mut logging = config.logging.clone();
    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.parse()?;
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.parse()?;
    }
    if let Some(ref file) = cli.log_file {
        logging.file = cli.workspace.join(file);
    }
    Ok(logging)
}
