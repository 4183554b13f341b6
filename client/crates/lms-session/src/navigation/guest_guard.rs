use crate::{GuardDecision, Redirect, RoleRouter, SessionStore, SessionValidator};

use std::sync::Arc;

use lms_core::Role;
use log::debug;

/// Inverse guard for login and signup: a visitor with a session is sent home.
pub struct GuestGuard {
    validator: SessionValidator,
    store: Arc<SessionStore>,
    role_router: Arc<RoleRouter>,
}

impl GuestGuard {
    pub fn new(
        validator: SessionValidator,
        store: Arc<SessionStore>,
        role_router: Arc<RoleRouter>,
    ) -> Self {
        Self {
            validator,
            store,
            role_router,
        }
    }

    pub async fn check(&self) -> GuardDecision {
        if !self.validator.validate(false).await {
            return GuardDecision::Allow;
        }

        let role = self
            .store
            .identity()
            .map(|identity| identity.role_kind())
            .unwrap_or(Role::Unrecognized);
        let landing = self.role_router.landing_for(role);
        debug!("Already signed in as '{role}', sending to {landing}");
        GuardDecision::Redirect(Redirect::to(landing))
    }
}
