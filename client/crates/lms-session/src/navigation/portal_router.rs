use crate::{GuardDecision, GuestGuard, NavigationGuard, Navigator, RouteAccess, RouteTable};

use std::sync::Arc;

use log::{debug, error};
use serde::Serialize;

/// Where a navigation ended up and how it got there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationOutcome {
    pub requested: String,
    /// Final location after following guard redirects
    pub location: String,
    /// Every redirect issued along the way, in order
    pub redirects: Vec<String>,
}

impl NavigationOutcome {
    /// The requested location was reached without any redirect.
    pub fn reached(&self) -> bool {
        self.redirects.is_empty()
    }
}

/// Resolves a location against the [`RouteTable`], runs the matching guard and
/// follows its redirects until a guard allows the location.
pub struct PortalRouter {
    table: RouteTable,
    guard: NavigationGuard,
    guest_guard: GuestGuard,
    navigator: Arc<dyn Navigator>,
    access_denied: String,
    max_redirects: u8,
}

impl PortalRouter {
    pub fn new(
        table: RouteTable,
        guard: NavigationGuard,
        guest_guard: GuestGuard,
        navigator: Arc<dyn Navigator>,
        access_denied: impl Into<String>,
        max_redirects: u8,
    ) -> Self {
        Self {
            table,
            guard,
            guest_guard,
            navigator,
            access_denied: access_denied.into(),
            max_redirects,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub async fn decide(&self, location: &str) -> GuardDecision {
        match self.table.access_for(location) {
            RouteAccess::Public => GuardDecision::Allow,
            RouteAccess::Guest => self.guest_guard.check().await,
            RouteAccess::Protected(roles) => self.guard.check(location, roles).await,
        }
    }

    pub async fn navigate(&self, requested: &str) -> NavigationOutcome {
        let mut location = requested.to_string();
        let mut redirects = Vec::new();

        loop {
            match self.decide(&location).await {
                GuardDecision::Allow => break,
                GuardDecision::Redirect(redirect) => {
                    if redirects.len() >= usize::from(self.max_redirects) {
                        error!(
                            "Navigation to {requested} exceeded {} redirects, stopping at {}",
                            self.max_redirects, self.access_denied
                        );
                        location = self.access_denied.clone();
                        redirects.push(location.clone());
                        break;
                    }
                    location = redirect.to_url();
                    debug!("Guard redirected to {location}");
                    redirects.push(location.clone());
                }
            }
        }

        self.navigator.set_location(location.clone());
        NavigationOutcome {
            requested: requested.to_string(),
            location,
            redirects,
        }
    }
}
