
use crate::{
    ApiClient, ApiError, ApiResult, Credentials, GuestGuard, IdentityNormalizer, MemoryNavigator,
    MemoryStorage, NavigationGuard, PersistenceAdapter, PortalRouter, PortalRoutes, PortalSession,
    RoleRouter, RouteTable, SessionApi, SessionStore, SessionValidator,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lms_config::{Config, StorageKind};
use lms_core::{Identity, Portal};
use serde_json::{Value, json};

pub(crate) const LOGOUT_TIMEOUT: Duration = Duration::from_millis(200);

/// Canned backend answer: a JSON payload or an HTTP error status
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Payload(Value),
    Status(u16),
}

impl Reply {
    fn into_result(self) -> ApiResult<Value> {
        match self {
            Reply::Payload(value) => Ok(value),
            Reply::Status(status) => Err(ApiError::status_error(status, "TEST", "canned")),
        }
    }
}

/// Scripted [`SessionApi`] counting every call.
pub(crate) struct FakeSessionApi {
    check: Mutex<Reply>,
    login: Mutex<Reply>,
    logout: Mutex<Reply>,
    delay: Duration,
    check_calls: AtomicUsize,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl FakeSessionApi {
    pub(crate) fn new() -> Self {
        Self {
            check: Mutex::new(Reply::Status(401)),
            login: Mutex::new(Reply::Status(401)),
            logout: Mutex::new(Reply::Payload(Value::Null)),
            delay: Duration::ZERO,
            check_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_check(self, reply: Reply) -> Self {
        self.set_check(reply);
        self
    }

    pub(crate) fn with_login(self, reply: Reply) -> Self {
        *self.login.lock().unwrap() = reply;
        self
    }

    pub(crate) fn with_logout(self, reply: Reply) -> Self {
        *self.logout.lock().unwrap() = reply;
        self
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn set_check(&self, reply: Reply) {
        *self.check.lock().unwrap() = reply;
    }

    pub(crate) fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl SessionApi for FakeSessionApi {
    async fn login(&self, _credentials: &Credentials) -> ApiResult<Value> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let reply = self.login.lock().unwrap().clone();
        reply.into_result()
    }

    async fn check_session(&self) -> ApiResult<Value> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let reply = self.check.lock().unwrap().clone();
        reply.into_result()
    }

    async fn logout(&self) -> ApiResult<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        let reply = self.logout.lock().unwrap().clone();
        reply.into_result().map(|_| ())
    }
}

pub(crate) fn student() -> Identity {
    Identity::new("jane@example.com", "student").with_names("Jane", "Public")
}

pub(crate) fn instructor() -> Identity {
    Identity::new("ian@example.com", "instructor").with_names("Ian", "Stone")
}

pub(crate) fn payload_for(identity: &Identity) -> Reply {
    Reply::Payload(json!({
        "success": true,
        "data": {
            "user": {
                "email": identity.email,
                "role": identity.role,
                "firstName": identity.first_name,
                "lastName": identity.last_name,
                "avatarUrl": identity.avatar_url,
            }
        }
    }))
}

pub(crate) fn memory_store(portal: Portal) -> (Arc<SessionStore>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = Arc::new(SessionStore::new(
        PersistenceAdapter::new(portal, storage.clone()),
        16,
    ));
    (store, storage)
}

pub(crate) fn validator_for(store: &Arc<SessionStore>, api: &Arc<FakeSessionApi>) -> SessionValidator {
    SessionValidator::new(
        Arc::clone(store),
        api.clone(),
        IdentityNormalizer::default(),
        LOGOUT_TIMEOUT,
    )
}

pub(crate) fn test_config(portal: Portal) -> Config {
    let mut config = Config::default();
    config.portal.kind = portal;
    config.session.storage = StorageKind::Memory;
    config.session.logout_timeout_ms = LOGOUT_TIMEOUT.as_millis() as u64;
    config
}

/// Fully wired student-portal session over a fake backend
pub(crate) fn portal_session(
    config: &Config,
    api: &Arc<FakeSessionApi>,
    storage: Arc<MemoryStorage>,
    location: &str,
) -> (PortalSession, Arc<MemoryNavigator>) {
    let navigator = Arc::new(MemoryNavigator::new(location));
    let api_client = Arc::new(ApiClient::new(&config.api).unwrap());
    let session = PortalSession::with_parts(config, navigator.clone(), storage, api_client, api.clone());
    (session, navigator)
}

/// Router over an explicit route table, sharing `store` and `api`
pub(crate) fn router_with_table(
    table: RouteTable,
    store: &Arc<SessionStore>,
    api: &Arc<FakeSessionApi>,
    max_redirects: u8,
) -> (PortalRouter, Arc<MemoryNavigator>) {
    let navigator = Arc::new(MemoryNavigator::default());
    let validator = validator_for(store, api);
    let role_router = Arc::new(RoleRouter::default());
    let routes = PortalRoutes::for_portal(store.portal());

    let router = PortalRouter::new(
        table,
        NavigationGuard::new(
            validator.clone(),
            Arc::clone(store),
            Arc::clone(&role_router),
            routes,
        ),
        GuestGuard::new(validator, Arc::clone(store), Arc::clone(&role_router)),
        navigator.clone(),
        role_router.access_denied_path(),
        max_redirects,
    );
    (router, navigator)
}
