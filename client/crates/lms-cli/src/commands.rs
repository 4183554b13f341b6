use crate::error::{CliError, Result as CliErrorResult};

use clap::Subcommand;
use lms_session::{Credentials, PortalSession};
use log::info;
use serde_json::{Value, json};

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Sign in (needs --email and --password) and print the identity
    Login,

    /// Validate the session against the backend
    Check {
        /// Ask the backend even when the session is already confirmed
        #[arg(long)]
        force: bool,
    },

    /// Run the route guards for each location in order
    Navigate {
        #[arg(required = true)]
        locations: Vec<String>,
    },

    /// Print the cached identity without contacting the backend
    Whoami,

    /// End the session locally and on the backend
    Logout,
}

impl Commands {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Check { .. } => "check",
            Self::Navigate { .. } => "navigate",
            Self::Whoami => "whoami",
            Self::Logout => "logout",
        }
    }
}

pub(crate) async fn execute(
    session: &PortalSession,
    command: &Commands,
    credentials: Option<&Credentials>,
) -> CliErrorResult<Value> {
    // Sign in first so every command sees an authenticated session
    if let Some(credentials) = credentials {
        let identity = session.login(credentials).await?;
        info!("Signed in to {} as {}", session.portal(), identity.email);
    }

    match command {
        Commands::Login => {
            if credentials.is_none() {
                return Err(CliError::missing_credentials(command.name()));
            }
            whoami(session)
        }
        Commands::Check { force } => {
            let valid = session.validate(*force).await;
            Ok(json!({
                "portal": session.portal(),
                "valid": valid,
                "state": session.state(),
            }))
        }
        Commands::Navigate { locations } => {
            let mut outcomes = Vec::with_capacity(locations.len());
            for location in locations {
                outcomes.push(serde_json::to_value(session.navigate(location).await)?);
            }
            Ok(Value::Array(outcomes))
        }
        Commands::Whoami => whoami(session),
        Commands::Logout => {
            session.logout().await;
            Ok(json!({
                "portal": session.portal(),
                "state": session.state(),
            }))
        }
    }
}

fn whoami(session: &PortalSession) -> CliErrorResult<Value> {
    let state = session.state();
    Ok(json!({
        "portal": session.portal(),
        "authenticated": state.authenticated,
        "identity": state.identity,
        "displayName": state.identity.as_ref().map(|i| i.display_name()),
        "landing": session.landing_path(),
    }))
}
