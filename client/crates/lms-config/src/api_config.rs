use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_API_PREFIX, DEFAULT_BASE_URL, DEFAULT_LOGIN_ENDPOINT,
    DEFAULT_LOGOUT_ENDPOINT, DEFAULT_SESSION_ENDPOINT, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
    MIN_TIMEOUT_SECS,
};

use serde::Deserialize;

/// Backend API location and auth endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the platform API (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Reserved path prefix that identifies platform API requests
    pub api_prefix: String,
    pub login_path: String,
    pub session_path: String,
    pub logout_path: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_prefix: String::from(DEFAULT_API_PREFIX),
            login_path: String::from(DEFAULT_LOGIN_ENDPOINT),
            session_path: String::from(DEFAULT_SESSION_ENDPOINT),
            logout_path: String::from(DEFAULT_LOGOUT_ENDPOINT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::api(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if !self.api_prefix.starts_with('/') {
            return Err(ConfigError::api(format!(
                "api.api_prefix must start with '/', got '{}'",
                self.api_prefix
            )));
        }

        for (name, value) in [
            ("login_path", &self.login_path),
            ("session_path", &self.session_path),
            ("logout_path", &self.logout_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::api(format!(
                    "api.{name} must start with '/', got '{value}'"
                )));
            }
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::api(format!(
                "api.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    /// Full URL of an endpoint under the API prefix
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/'),
            endpoint
        )
    }
}
