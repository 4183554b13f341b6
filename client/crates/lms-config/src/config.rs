use crate::{
    ApiConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, PortalConfig, RoutingConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub portal: PortalConfig,
    pub session: SessionConfig,
    pub routing: RoutingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for LMS_CONFIG_DIR env var, else use ./.lms/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply LMS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: LMS_CONFIG_DIR env var > ./.lms/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.portal.validate()?;
        self.session.validate()?;
        self.routing.validate()?;
        Ok(())
    }

    /// Absolute directory holding the per-portal session files.
    pub fn storage_dir(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.session.storage_dir))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {}{} (timeout {}s)",
            self.api.base_url, self.api.api_prefix, self.api.timeout_secs
        );
        info!(
            "  portal: {} (login {})",
            self.portal.kind,
            self.portal.login_path()
        );
        info!(
            "  session: storage={:?}, dir={}, capacity={}, logout_timeout={}ms",
            self.session.storage,
            self.session.storage_dir,
            self.session.channel_capacity,
            self.session.logout_timeout_ms
        );
        info!(
            "  routing: admin={}, student={}, instructor={}, denied={}, unknown_role={}",
            self.routing.admin_home,
            self.routing.student_home,
            self.routing.instructor_home,
            self.routing.access_denied,
            self.routing.unknown_role_policy
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("LMS_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_string("LMS_API_PREFIX", &mut self.api.api_prefix);
        Self::apply_env_parse("LMS_API_TIMEOUT_SECS", &mut self.api.timeout_secs);

        // Portal
        Self::apply_env_parse("LMS_PORTAL", &mut self.portal.kind);
        Self::apply_env_option_string("LMS_PORTAL_LOGIN_PATH", &mut self.portal.login_path);

        // Session
        Self::apply_env_parse("LMS_SESSION_STORAGE", &mut self.session.storage);
        Self::apply_env_string("LMS_SESSION_STORAGE_DIR", &mut self.session.storage_dir);
        Self::apply_env_parse(
            "LMS_SESSION_CHANNEL_CAPACITY",
            &mut self.session.channel_capacity,
        );
        Self::apply_env_parse(
            "LMS_SESSION_LOGOUT_TIMEOUT_MS",
            &mut self.session.logout_timeout_ms,
        );

        // Routing
        Self::apply_env_parse(
            "LMS_ROUTING_UNKNOWN_ROLE_POLICY",
            &mut self.routing.unknown_role_policy,
        );
        Self::apply_env_parse("LMS_ROUTING_MAX_REDIRECTS", &mut self.routing.max_redirects);

        // Logging
        Self::apply_env_parse("LMS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LMS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("LMS_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
