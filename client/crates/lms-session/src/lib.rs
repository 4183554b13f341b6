//! Session and role-based access control for the LMS portals.
//!
//! One [`PortalSession`] owns every component for one portal: the durable identity
//! mirror, the reactive [`SessionStore`], the coalescing [`SessionValidator`], the
//! [`RoleRouter`], the navigation guards and the HTTP interceptors.

pub mod error;
pub mod http;
pub mod identity_normalizer;
pub mod navigation;
pub mod persistence;
pub mod portal_session;
pub mod role_router;
pub mod session_store;
pub mod session_validator;

#[cfg(test)]
mod tests;

pub use error::{Result as SessionResult, SessionError};
pub use http::{
    ApiClient, ApiError, ApiResult, Credentials, CredentialsInterceptor, ErrorInterceptor,
    HttpSessionApi, OutgoingRequest, PortalClient, SessionApi,
};
pub use identity_normalizer::{FieldRule, IdentityField, IdentityNormalizer};
pub use navigation::{
    GuardDecision, GuestGuard, MemoryNavigator, NavigationGuard, NavigationOutcome, Navigator,
    PortalRouter, PortalRoutes, Redirect, RouteAccess, RouteRule, RouteTable, path_of,
};
pub use persistence::{
    FileStorage, KeyValueStore, MemoryStorage, PersistenceAdapter, StorageError, StorageResult,
};
pub use portal_session::PortalSession;
pub use role_router::RoleRouter;
pub use session_store::SessionStore;
pub use session_validator::SessionValidator;

/// Query parameter carrying the originally requested location
pub const RETURN_URL_PARAM: &str = "returnUrl";
/// Query parameter carrying the forced-logout hint
pub const REASON_PARAM: &str = "reason";
pub const REASON_SESSION_EXPIRED: &str = "session_expired";
