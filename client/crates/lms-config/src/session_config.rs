use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CHANNEL_CAPACITY, DEFAULT_LOGOUT_TIMEOUT_MS,
    DEFAULT_STORAGE_DIR, MAX_CHANNEL_CAPACITY, MAX_LOGOUT_TIMEOUT_MS, MIN_CHANNEL_CAPACITY,
    MIN_LOGOUT_TIMEOUT_MS,
};

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Durable storage backend for the identity mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

impl FromStr for StorageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub storage: StorageKind,
    /// Directory (relative to the config dir) holding one file per portal
    pub storage_dir: String,
    /// Buffered state changes per subscriber before it lags
    pub channel_capacity: usize,
    /// Upper bound on the best-effort logout call
    pub logout_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            storage_dir: String::from(DEFAULT_STORAGE_DIR),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            logout_timeout_ms: DEFAULT_LOGOUT_TIMEOUT_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.storage_dir.trim().is_empty()
            || std::path::Path::new(&self.storage_dir).is_absolute()
            || self.storage_dir.contains("..")
        {
            return Err(ConfigError::session(
                "session.storage_dir must be a non-empty relative path without '..'",
            ));
        }

        if self.channel_capacity < MIN_CHANNEL_CAPACITY
            || self.channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(ConfigError::session(format!(
                "session.channel_capacity must be {}-{}, got {}",
                MIN_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY, self.channel_capacity
            )));
        }

        if self.logout_timeout_ms < MIN_LOGOUT_TIMEOUT_MS
            || self.logout_timeout_ms > MAX_LOGOUT_TIMEOUT_MS
        {
            return Err(ConfigError::session(format!(
                "session.logout_timeout_ms must be {}-{}, got {}",
                MIN_LOGOUT_TIMEOUT_MS, MAX_LOGOUT_TIMEOUT_MS, self.logout_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn logout_timeout(&self) -> Duration {
        Duration::from_millis(self.logout_timeout_ms)
    }
}
