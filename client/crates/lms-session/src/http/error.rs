use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur during API calls
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error {status}: {message} (code: {code}) {location}")]
    Status {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request URL '{url}' {location}")]
    InvalidUrl { url: String, location: ErrorLocation },
}

impl ApiError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ApiError::Transport {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ApiError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create a status error with location
    #[track_caller]
    pub fn status_error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_url(url: impl Into<String>) -> Self {
        ApiError::InvalidUrl {
            url: url.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status of an error response; `None` when no response arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// No response reached the client
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. }) && self.status().is_none()
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ApiError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ApiError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
