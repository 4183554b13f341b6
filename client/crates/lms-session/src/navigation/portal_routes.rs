use crate::{REASON_PARAM, REASON_SESSION_EXPIRED, RETURN_URL_PARAM, Redirect, path_of};

use lms_config::PortalConfig;
use lms_core::Portal;

/// Auth pages of one portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalRoutes {
    pub portal: Portal,
    pub login: String,
    pub signup: String,
}

impl PortalRoutes {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            portal: config.kind,
            login: config.login_path().to_string(),
            signup: config.signup_path().to_string(),
        }
    }

    pub fn for_portal(portal: Portal) -> Self {
        Self {
            portal,
            login: portal.default_login_path().to_string(),
            signup: portal.default_signup_path().to_string(),
        }
    }

    /// Whether `location` is the login or signup page, ignoring query and fragment.
    pub fn is_auth_page(&self, location: &str) -> bool {
        let path = path_of(location).trim_end_matches('/');
        path == self.login.trim_end_matches('/') || path == self.signup.trim_end_matches('/')
    }

    pub fn login_redirect(&self, return_url: &str) -> Redirect {
        Redirect::to(&self.login).with_query(RETURN_URL_PARAM, return_url)
    }

    pub fn session_expired_redirect(&self, return_url: &str) -> Redirect {
        self.login_redirect(return_url)
            .with_query(REASON_PARAM, REASON_SESSION_EXPIRED)
    }
}
