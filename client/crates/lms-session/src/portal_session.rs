use crate::{
    ApiClient, Credentials, ErrorInterceptor, FileStorage, GuestGuard, HttpSessionApi,
    IdentityNormalizer, KeyValueStore, MemoryStorage, NavigationGuard, NavigationOutcome,
    Navigator, PersistenceAdapter, PortalClient, PortalRouter, PortalRoutes, RoleRouter,
    RouteTable, SessionApi, SessionResult, SessionStore, SessionValidator,
};

use std::sync::Arc;

use lms_config::{Config, StorageKind};
use lms_core::{Identity, Portal, SessionState};
use log::info;
use tokio::sync::broadcast;

/// Every session component of one portal, wired together.
///
/// Portals never share a store, a validator or a persistence namespace.
pub struct PortalSession {
    portal: Portal,
    store: Arc<SessionStore>,
    validator: SessionValidator,
    role_router: Arc<RoleRouter>,
    routes: PortalRoutes,
    client: PortalClient,
    router: PortalRouter,
}

impl PortalSession {
    /// Builds the session for `config.portal.kind` over the configured storage and
    /// the platform HTTP API.
    pub fn from_config(config: &Config, navigator: Arc<dyn Navigator>) -> SessionResult<Self> {
        let portal = config.portal.kind;
        let storage: Arc<dyn KeyValueStore> = match config.session.storage {
            StorageKind::File => {
                let storage = FileStorage::for_portal(&config.storage_dir()?, portal);
                info!("{portal} session file: {}", storage.path().display());
                Arc::new(storage)
            }
            StorageKind::Memory => Arc::new(MemoryStorage::new()),
        };

        let api_client = Arc::new(ApiClient::new(&config.api)?);
        let session_api: Arc<dyn SessionApi> =
            Arc::new(HttpSessionApi::new(Arc::clone(&api_client), &config.api));

        Ok(Self::with_parts(
            config,
            navigator,
            storage,
            api_client,
            session_api,
        ))
    }

    /// Wires a session from explicit parts; the store is hydrated from `storage`.
    pub fn with_parts(
        config: &Config,
        navigator: Arc<dyn Navigator>,
        storage: Arc<dyn KeyValueStore>,
        api_client: Arc<ApiClient>,
        session_api: Arc<dyn SessionApi>,
    ) -> Self {
        let portal = config.portal.kind;
        let logout_timeout = config.session.logout_timeout();

        let persistence = PersistenceAdapter::new(portal, storage);
        let store = Arc::new(SessionStore::hydrate(
            persistence,
            config.session.channel_capacity,
        ));
        let validator = SessionValidator::new(
            Arc::clone(&store),
            Arc::clone(&session_api),
            IdentityNormalizer::default(),
            logout_timeout,
        );
        let role_router = Arc::new(RoleRouter::new(&config.routing));
        let routes = PortalRoutes::new(&config.portal);

        let interceptor = ErrorInterceptor::new(
            Arc::clone(&store),
            Arc::clone(&navigator),
            routes.clone(),
            Arc::clone(&role_router),
            session_api,
            logout_timeout,
        );
        let client = PortalClient::new(api_client, interceptor);

        let router = PortalRouter::new(
            RouteTable::for_portal(&routes, &role_router),
            NavigationGuard::new(
                validator.clone(),
                Arc::clone(&store),
                Arc::clone(&role_router),
                routes.clone(),
            ),
            GuestGuard::new(validator.clone(), Arc::clone(&store), Arc::clone(&role_router)),
            navigator,
            role_router.access_denied_path(),
            config.routing.max_redirects,
        );

        Self {
            portal,
            store,
            validator,
            role_router,
            routes,
            client,
            router,
        }
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn validator(&self) -> &SessionValidator {
        &self.validator
    }

    pub fn role_router(&self) -> &RoleRouter {
        &self.role_router
    }

    pub fn routes(&self) -> &PortalRoutes {
        &self.routes
    }

    pub fn client(&self) -> &PortalClient {
        &self.client
    }

    pub fn router(&self) -> &PortalRouter {
        &self.router
    }

    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.store.identity()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub async fn validate(&self, force: bool) -> bool {
        self.validator.validate(force).await
    }

    pub async fn login(&self, credentials: &Credentials) -> SessionResult<Identity> {
        self.validator.login(credentials).await
    }

    pub async fn logout(&self) {
        self.validator.logout().await;
    }

    pub async fn navigate(&self, location: &str) -> NavigationOutcome {
        self.router.navigate(location).await
    }

    /// Landing path for the current role
    pub fn landing_path(&self) -> &str {
        let role = self.store.role().unwrap_or_default();
        self.role_router.landing_path(&role)
    }
}
