use crate::{ApiError, StorageError};

use std::panic::Location;

use error_location::ErrorLocation;
use lms_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session API call failed: {source} {location}")]
    Api {
        #[source]
        source: ApiError,
        location: ErrorLocation,
    },

    #[error("Session storage failed: {source} {location}")]
    Storage {
        #[source]
        source: StorageError,
        location: ErrorLocation,
    },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Response carried no recognizable identity {location}")]
    UnrecognizedIdentity { location: ErrorLocation },
}

impl SessionError {
    #[track_caller]
    pub fn unrecognized_identity() -> Self {
        Self::UnrecognizedIdentity {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Backend rejected the credentials or the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { source, .. } if source.is_unauthorized())
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ApiError> for SessionError {
    #[track_caller]
    fn from(source: ApiError) -> Self {
        Self::Api {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StorageError> for SessionError {
    #[track_caller]
    fn from(source: StorageError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
