//! lms - exercise the portal session layer against a running backend
//!
//! Prints JSON on stdout; logs go to stderr (or the configured log file).
//!
//! # Examples
//!
//! ```bash
//! # Sign in to the student portal and print the identity
//! lms --portal student --email jane@example.com --password secret login
//!
//! # See where the guards send a signed-in instructor
//! lms --portal instructor --email ian@example.com --password secret navigate /admin/users /instructor/courses
//!
//! # Inspect the identity cached by the last run
//! lms --portal student whoami --pretty
//! ```

mod cli;
mod commands;
mod error;
mod logger;

#[cfg(test)]
mod tests;

use crate::{cli::Cli, error::Result as CliErrorResult};

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lms_config::Config;
use lms_session::{MemoryNavigator, PortalSession};
use log::info;
use serde_json::Value;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> CliErrorResult<Value> {
    let mut config = Config::load()?;
    cli.apply_overrides(&mut config)?;
    config.validate()?;

    let log_file_path = match config.logging.file {
        Some(ref filename) => {
            let log_dir = Config::config_dir()?.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir).map_err(|e| {
                error::CliError::logger(format!(
                    "Failed to create log directory {}: {e}",
                    log_dir.display()
                ))
            })?;
            Some(log_dir.join(filename))
        }
        None => None,
    };
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("lms v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let navigator = Arc::new(MemoryNavigator::default());
    let session = PortalSession::from_config(&config, navigator)?;

    let credentials = cli.credentials();
    commands::execute(&session, &cli.command, credentials.as_ref()).await
}
