use crate::{ConfigError, ConfigErrorResult};

use lms_core::Portal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    pub kind: Portal,
    /// Overrides the portal's default login route
    pub login_path: Option<String>,
    /// Overrides the portal's default signup route
    pub signup_path: Option<String>,
}

impl PortalConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, value) in [
            ("login_path", &self.login_path),
            ("signup_path", &self.signup_path),
        ] {
            if let Some(path) = value
                && !path.starts_with('/')
            {
                return Err(ConfigError::portal(format!(
                    "portal.{name} must start with '/', got '{path}'"
                )));
            }
        }
        Ok(())
    }

    pub fn login_path(&self) -> &str {
        self.login_path
            .as_deref()
            .unwrap_or_else(|| self.kind.default_login_path())
    }

    pub fn signup_path(&self) -> &str {
        self.signup_path
            .as_deref()
            .unwrap_or_else(|| self.kind.default_signup_path())
    }
}
