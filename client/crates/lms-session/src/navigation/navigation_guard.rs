use crate::{
    GuardDecision, PortalRoutes, Redirect, RoleRouter, SessionStore, SessionValidator, path_of,
};

use std::sync::Arc;

use lms_core::Role;
use log::{debug, info};

/// Gate for protected routes.
///
/// Unauthenticated visitors go to the portal login with a `returnUrl`; authenticated
/// visitors outside the allow-list go to their own landing path.
pub struct NavigationGuard {
    validator: SessionValidator,
    store: Arc<SessionStore>,
    role_router: Arc<RoleRouter>,
    routes: PortalRoutes,
}

impl NavigationGuard {
    pub fn new(
        validator: SessionValidator,
        store: Arc<SessionStore>,
        role_router: Arc<RoleRouter>,
        routes: PortalRoutes,
    ) -> Self {
        Self {
            validator,
            store,
            role_router,
            routes,
        }
    }

    /// `requested` is the full location (path and query). An empty `allowed` list
    /// admits any authenticated role.
    pub async fn check(&self, requested: &str, allowed: &[Role]) -> GuardDecision {
        if !self.validator.validate(false).await {
            debug!("{requested} requires a session, sending to {}", self.routes.login);
            return GuardDecision::Redirect(self.routes.login_redirect(requested));
        }

        if allowed.is_empty() {
            return GuardDecision::Allow;
        }

        let role = self
            .store
            .identity()
            .map(|identity| identity.role_kind())
            .unwrap_or(Role::Unrecognized);
        if allowed.contains(&role) {
            return GuardDecision::Allow;
        }

        let landing = self.role_router.landing_for(role);
        let target = if is_same_path(landing, requested) {
            self.role_router.access_denied_path()
        } else {
            landing
        };

        info!("Role '{role}' may not open {requested}, redirecting to {target}");
        GuardDecision::Redirect(Redirect::to(target))
    }
}

/// A landing path equal to the rejected path would be rejected again. Longer cycles
/// are cut by the router's redirect limit.
fn is_same_path(landing: &str, requested: &str) -> bool {
    path_of(landing).trim_end_matches('/') == path_of(requested).trim_end_matches('/')
}
