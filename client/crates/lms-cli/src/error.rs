use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] lms_config::ConfigError),

    #[error("{0}")]
    Session(#[from] lms_session::SessionError),

    #[error("Invalid portal: {0}")]
    Portal(#[from] lms_core::CoreError),

    #[error("Logger setup failed: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("--email and --password are required for {command} {location}")]
    MissingCredentials {
        command: &'static str,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_credentials(command: &'static str) -> Self {
        Self::MissingCredentials {
            command,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
