use crate::{PortalRoutes, RoleRouter, path_of};

use lms_core::Role;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", content = "roles", rename_all = "snake_case")]
pub enum RouteAccess {
    /// Reachable by anyone
    Public,
    /// Only for visitors without a session (login, signup)
    Guest,
    /// Requires a session; an empty list admits any authenticated role
    Protected(Vec<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub access: RouteAccess,
}

/// Access rules keyed by path prefix. The longest matching prefix wins; a prefix
/// only matches on a segment boundary, so `/admin` covers `/admin/users` but not
/// `/administrators`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    default_access: RouteAccess,
}

impl RouteTable {
    pub fn new(default_access: RouteAccess) -> Self {
        Self {
            rules: Vec::new(),
            default_access,
        }
    }

    /// Auth pages are guest-only, the access-denied page is public and each role's
    /// area is restricted to that role. Everything else needs any session.
    pub fn for_portal(routes: &PortalRoutes, role_router: &RoleRouter) -> Self {
        Self::new(RouteAccess::Protected(Vec::new()))
            .with_rule(&routes.login, RouteAccess::Guest)
            .with_rule(&routes.signup, RouteAccess::Guest)
            .with_rule(role_router.access_denied_path(), RouteAccess::Public)
            .with_rule("/admin", RouteAccess::Protected(vec![Role::Admin]))
            .with_rule("/student", RouteAccess::Protected(vec![Role::Student]))
            .with_rule("/instructor", RouteAccess::Protected(vec![Role::Instructor]))
    }

    pub fn with_rule(mut self, prefix: &str, access: RouteAccess) -> Self {
        let prefix = normalize(prefix);
        self.rules.retain(|rule| rule.prefix != prefix);
        self.rules.push(RouteRule { prefix, access });
        self
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn access_for(&self, location: &str) -> &RouteAccess {
        let path = normalize(path_of(location));
        self.rules
            .iter()
            .filter(|rule| covers(&rule.prefix, &path))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| &rule.access)
            .unwrap_or(&self.default_access)
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::from("/")
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
