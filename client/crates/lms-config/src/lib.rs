mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod portal_config;
mod routing_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use portal_config::PortalConfig;
pub use routing_config::{RoutingConfig, UnknownRolePolicy};
pub use session_config::{SessionConfig, StorageKind};

pub const CONFIG_DIR_ENV: &str = "LMS_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".lms";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// API
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/auth/login";
pub const DEFAULT_SESSION_ENDPOINT: &str = "/auth/me";
pub const DEFAULT_LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 120;

// Session
pub const DEFAULT_STORAGE_DIR: &str = "sessions";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;
pub const MIN_CHANNEL_CAPACITY: usize = 1;
pub const MAX_CHANNEL_CAPACITY: usize = 1024;
pub const DEFAULT_LOGOUT_TIMEOUT_MS: u64 = 2000;
pub const MIN_LOGOUT_TIMEOUT_MS: u64 = 50;
pub const MAX_LOGOUT_TIMEOUT_MS: u64 = 30_000;

// Routing
pub const DEFAULT_ADMIN_HOME: &str = "/admin/dashboard";
pub const DEFAULT_STUDENT_HOME: &str = "/student/dashboard";
pub const DEFAULT_INSTRUCTOR_HOME: &str = "/instructor/dashboard";
pub const DEFAULT_ACCESS_DENIED: &str = "/access-denied";
pub const DEFAULT_MAX_REDIRECTS: u8 = 5;
pub const MIN_MAX_REDIRECTS: u8 = 1;
pub const MAX_MAX_REDIRECTS: u8 = 20;

// Logging
pub const DEFAULT_LOG_LEVEL_STRING: &str = "info";
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
pub const DEFAULT_LOG_DIRECTORY: &str = "log";
