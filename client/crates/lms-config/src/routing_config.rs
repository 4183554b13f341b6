use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_DENIED, DEFAULT_ADMIN_HOME,
    DEFAULT_INSTRUCTOR_HOME, DEFAULT_MAX_REDIRECTS, DEFAULT_STUDENT_HOME, MAX_MAX_REDIRECTS,
    MIN_MAX_REDIRECTS,
};

use std::str::FromStr;

use serde::Deserialize;

/// Where an authenticated visitor with an empty or unknown role lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRolePolicy {
    /// Land on the access-denied page
    #[default]
    Deny,
    /// Land on the least privileged home (student)
    LeastPrivilege,
    /// Land on the administrative home (legacy behavior)
    Administrative,
}

impl FromStr for UnknownRolePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "deny" => Ok(Self::Deny),
            "least_privilege" => Ok(Self::LeastPrivilege),
            "administrative" => Ok(Self::Administrative),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for UnknownRolePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deny => "deny",
            Self::LeastPrivilege => "least_privilege",
            Self::Administrative => "administrative",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub admin_home: String,
    pub student_home: String,
    pub instructor_home: String,
    pub access_denied: String,
    pub unknown_role_policy: UnknownRolePolicy,
    /// Guard redirects followed for one navigation before giving up
    pub max_redirects: u8,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            admin_home: String::from(DEFAULT_ADMIN_HOME),
            student_home: String::from(DEFAULT_STUDENT_HOME),
            instructor_home: String::from(DEFAULT_INSTRUCTOR_HOME),
            access_denied: String::from(DEFAULT_ACCESS_DENIED),
            unknown_role_policy: UnknownRolePolicy::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RoutingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, value) in [
            ("admin_home", &self.admin_home),
            ("student_home", &self.student_home),
            ("instructor_home", &self.instructor_home),
            ("access_denied", &self.access_denied),
        ] {
            if value.trim().is_empty() || !value.starts_with('/') {
                return Err(ConfigError::routing(format!(
                    "routing.{name} must be an absolute path, got '{value}'"
                )));
            }
        }

        if self.max_redirects < MIN_MAX_REDIRECTS || self.max_redirects > MAX_MAX_REDIRECTS {
            return Err(ConfigError::routing(format!(
                "routing.max_redirects must be {}-{}, got {}",
                MIN_MAX_REDIRECTS, MAX_MAX_REDIRECTS, self.max_redirects
            )));
        }

        Ok(())
    }
}
