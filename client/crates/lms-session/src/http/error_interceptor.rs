use crate::http::session_api::best_effort_logout;
use crate::{ApiError, Navigator, PortalRoutes, Redirect, RoleRouter, SessionApi, SessionStore};

use std::sync::Arc;
use std::time::Duration;

use lms_core::Role;
use log::{debug, info};

/// Corrective navigation for failed platform calls.
///
/// A 401 ends the local session and sends the visitor to login; a 403 sends them to
/// an area their role may use. The original error is always handed back so the call
/// site can still render its own message.
pub struct ErrorInterceptor {
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    routes: PortalRoutes,
    role_router: Arc<RoleRouter>,
    session_api: Arc<dyn SessionApi>,
    logout_timeout: Duration,
}

impl ErrorInterceptor {
    pub fn new(
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        routes: PortalRoutes,
        role_router: Arc<RoleRouter>,
        session_api: Arc<dyn SessionApi>,
        logout_timeout: Duration,
    ) -> Self {
        Self {
            store,
            navigator,
            routes,
            role_router,
            session_api,
            logout_timeout,
        }
    }

    pub async fn handle(&self, error: ApiError) -> ApiError {
        if error.is_unauthorized() {
            self.on_unauthorized().await;
        } else if error.is_forbidden() {
            self.on_forbidden();
        }
        error
    }

    async fn on_unauthorized(&self) {
        let current = self.navigator.current_location();
        if self.routes.is_auth_page(&current) {
            debug!("401 on {current}, leaving it to the page");
            return;
        }

        self.store.clear();
        let redirect = self.routes.session_expired_redirect(&current);
        info!(
            "{} session expired, redirecting to {}",
            self.store.portal(),
            redirect.path
        );
        self.navigator.redirect(&redirect);

        best_effort_logout(self.session_api.as_ref(), self.logout_timeout).await;
    }

    fn on_forbidden(&self) {
        let role = self
            .store
            .identity()
            .map(|identity| identity.role_kind())
            .unwrap_or(Role::Unrecognized);

        let redirect = if role.is_recognized() {
            Redirect::to(self.role_router.landing_for(role))
        } else {
            let current = self.navigator.current_location();
            self.routes.login_redirect(&current)
        };

        info!("403 for role '{role}', redirecting to {}", redirect.path);
        self.navigator.redirect(&redirect);
    }
}
