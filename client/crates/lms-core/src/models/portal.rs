use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// One of the independent front-end surfaces sharing the backend.
///
/// Each portal keeps its own session cache and persistence namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Portal {
    Admin,
    #[default]
    Student,
    Instructor,
}

impl Portal {
    pub const ALL: [Portal; 3] = [Portal::Admin, Portal::Student, Portal::Instructor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
            Self::Instructor => "instructor",
        }
    }

    /// Namespace prefix for durable storage keys
    pub fn storage_namespace(&self) -> &'static str {
        self.as_str()
    }

    pub fn default_login_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/login",
            Self::Student => "/student/login",
            Self::Instructor => "/instructor/login",
        }
    }

    pub fn default_signup_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/signup",
            Self::Student => "/student/signup",
            Self::Instructor => "/instructor/signup",
        }
    }
}

impl FromStr for Portal {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            _ => Err(CoreError::InvalidPortal {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
