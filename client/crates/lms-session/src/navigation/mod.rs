pub(crate) mod guard_decision;
pub(crate) mod guest_guard;
pub(crate) mod navigation_guard;
pub(crate) mod navigator;
pub(crate) mod portal_router;
pub(crate) mod portal_routes;
pub(crate) mod redirect;
pub(crate) mod route_table;

pub use guard_decision::GuardDecision;
pub use guest_guard::GuestGuard;
pub use navigation_guard::NavigationGuard;
pub use navigator::{MemoryNavigator, Navigator};
pub use portal_router::{NavigationOutcome, PortalRouter};
pub use portal_routes::PortalRoutes;
pub use redirect::{Redirect, path_of};
pub use route_table::{RouteAccess, RouteRule, RouteTable};
