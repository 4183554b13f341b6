use crate::commands::Commands;

use clap::Parser;
use lms_config::{Config, LogLevel};

#[derive(Parser)]
#[command(name = "lms")]
#[command(about = "Session and access checks for the LMS portals")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Portal to act as: admin, student or instructor (default from config)
    #[arg(long, global = true)]
    pub(crate) portal: Option<String>,

    /// API origin (e.g., http://127.0.0.1:8000)
    #[arg(long, global = true)]
    pub(crate) server: Option<String>,

    /// Sign in with these credentials before running the command
    #[arg(long, global = true)]
    pub(crate) email: Option<String>,

    #[arg(long, global = true, requires = "email")]
    pub(crate) password: Option<String>,

    /// Log level override (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}

impl Cli {
    /// Flags win over config file and environment.
    pub(crate) fn apply_overrides(&self, config: &mut Config) -> crate::error::Result<()> {
        if let Some(ref portal) = self.portal {
            config.portal.kind = portal.parse()?;
        }
        if let Some(ref server) = self.server {
            config.api.base_url = server.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = LogLevel::parse_lenient(level);
        }
        Ok(())
    }

    pub(crate) fn credentials(&self) -> Option<lms_session::Credentials> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => {
                Some(lms_session::Credentials::new(email.as_str(), password.as_str()))
            }
            _ => None,
        }
    }
}
