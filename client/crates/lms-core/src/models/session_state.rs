use crate::Identity;

use serde::{Deserialize, Serialize};

/// Authentication state of one portal.
///
/// `authenticated == true` implies `identity.is_some()`; the store only constructs
/// states through [`SessionState::authenticated`] and [`SessionState::anonymous`] to
/// keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub authenticated: bool,
    pub identity: Option<Identity>,
}

impl SessionState {
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            authenticated: true,
            identity: Some(identity),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Identity known from durable storage but not yet confirmed by the backend.
    pub fn unconfirmed(identity: Identity) -> Self {
        Self {
            authenticated: false,
            identity: Some(identity),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .map(|i| i.role.as_str())
            .filter(|r| !r.is_empty())
    }
}
