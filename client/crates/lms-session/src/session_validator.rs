use crate::http::session_api::best_effort_logout;
use crate::{Credentials, IdentityNormalizer, SessionApi, SessionError, SessionResult, SessionStore};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared, WeakShared};
use lms_core::Identity;
use log::{debug, info, warn};

type PendingValidation = Shared<BoxFuture<'static, bool>>;

struct ValidatorInner {
    store: Arc<SessionStore>,
    api: Arc<dyn SessionApi>,
    normalizer: IdentityNormalizer,
    logout_timeout: Duration,
    /// At most one in-flight session check; waiters share its outcome
    pending: Mutex<Option<(u64, WeakShared<BoxFuture<'static, bool>>)>>,
    next_id: AtomicU64,
}

impl ValidatorInner {
    fn slot(&self) -> MutexGuard<'_, Option<(u64, WeakShared<BoxFuture<'static, bool>>)>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Frees the pending slot when the validation future finishes or is dropped.
struct PendingSlotGuard {
    inner: Arc<ValidatorInner>,
    id: u64,
}

impl Drop for PendingSlotGuard {
    fn drop(&mut self) {
        let mut slot = self.inner.slot();
        if matches!(slot.as_ref(), Some((id, _)) if *id == self.id) {
            *slot = None;
        }
    }
}

/// Answers "is this session valid?" against the backend and keeps the store in sync.
///
/// Concurrent callers share one network check. Cloning is cheap; clones share the
/// same pending slot.
#[derive(Clone)]
pub struct SessionValidator {
    inner: Arc<ValidatorInner>,
}

impl SessionValidator {
    pub fn new(
        store: Arc<SessionStore>,
        api: Arc<dyn SessionApi>,
        normalizer: IdentityNormalizer,
        logout_timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ValidatorInner {
                store,
                api,
                normalizer,
                logout_timeout,
                pending: Mutex::new(None),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.inner.store
    }

    /// Whether a session check is currently in flight
    pub fn is_pending(&self) -> bool {
        self.inner.slot().is_some()
    }

    /// Returns `true` when the session is valid.
    ///
    /// Without `force`, an already authenticated store answers immediately. Errors
    /// never escape: any failure clears the store and yields `false`.
    pub async fn validate(&self, force: bool) -> bool {
        if !force && self.inner.store.is_authenticated() {
            return true;
        }
        self.pending_validation().await
    }

    fn pending_validation(&self) -> PendingValidation {
        let mut slot = self.inner.slot();

        if let Some((_, weak)) = slot.as_ref()
            && let Some(pending) = weak.upgrade()
        {
            debug!("Joining in-flight {} validation", self.inner.store.portal());
            return pending;
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let guard = PendingSlotGuard {
            inner: Arc::clone(&self.inner),
            id,
        };
        let inner = Arc::clone(&self.inner);
        let pending = async move {
            let _guard = guard;
            run_validation(&inner).await
        }
        .boxed()
        .shared();

        *slot = pending.downgrade().map(|weak| (id, weak));
        pending
    }

    /// Authenticates with the backend and commits the resulting identity.
    ///
    /// On failure the store is left as it was.
    pub async fn login(&self, credentials: &Credentials) -> SessionResult<Identity> {
        let store = &self.inner.store;
        let payload = self.inner.api.login(credentials).await.map_err(|e| {
            warn!("{} login for {} failed: {e}", store.portal(), credentials.email);
            SessionError::from(e)
        })?;

        let identity = self
            .inner
            .normalizer
            .normalize(&payload)
            .ok_or_else(SessionError::unrecognized_identity)?;

        let identity = identity.merged_with_known(store.identity().as_ref());
        store.set_authenticated(identity.clone());
        info!(
            "{} login succeeded for {} (role '{}')",
            store.portal(),
            identity.email,
            identity.role
        );
        Ok(identity)
    }

    /// Clears the local session, then tells the backend (best effort).
    pub async fn logout(&self) {
        let store = &self.inner.store;
        store.clear();
        info!("{} session cleared", store.portal());
        best_effort_logout(self.inner.api.as_ref(), self.inner.logout_timeout).await;
    }
}

async fn run_validation(inner: &ValidatorInner) -> bool {
    let store = &inner.store;
    let generation = store.generation();

    let outcome = match inner.api.check_session().await {
        Ok(payload) => inner
            .normalizer
            .normalize(&payload)
            .ok_or_else(|| String::from("response carried no recognizable identity")),
        Err(e) => Err(e.to_string()),
    };

    match outcome {
        Ok(identity) => {
            let identity = identity.merged_with_known(store.identity().as_ref());
            if store.commit_validated(identity, generation) {
                debug!("{} session valid", store.portal());
                true
            } else {
                store.is_authenticated()
            }
        }
        Err(reason) => {
            warn!("{} session invalid: {reason}", store.portal());
            if store.clear_if_current(generation) {
                false
            } else {
                debug!("{} session changed during validation", store.portal());
                store.is_authenticated()
            }
        }
    }
}
