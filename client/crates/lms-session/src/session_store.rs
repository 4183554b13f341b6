use crate::PersistenceAdapter;

use std::sync::{Mutex, MutexGuard, PoisonError};

use lms_core::{Identity, Portal, SessionState};
use log::{debug, info, warn};
use tokio::sync::broadcast;

struct StoreInner {
    state: SessionState,
    /// Bumped on every applied mutation and on every clear
    generation: u64,
}

/// In-memory, reactive holder of one portal's authentication state.
///
/// This is the single source of truth for "am I logged in / what role am I". Every
/// mutation is persisted and broadcast to subscribers while the state lock is held,
/// so subscribers observe changes in the order they were applied.
///
/// Persistence is synchronous and runs under the lock, so durable storage always
/// matches the last applied state. The lock is never held across an `.await`; a
/// [`FileStorage`](crate::FileStorage) write blocks the calling worker for one small
/// fsync and rename.
pub struct SessionStore {
    portal: Portal,
    inner: Mutex<StoreInner>,
    changes: broadcast::Sender<SessionState>,
    persistence: PersistenceAdapter,
}

impl SessionStore {
    /// Creates an anonymous store.
    pub fn new(persistence: PersistenceAdapter, channel_capacity: usize) -> Self {
        Self::with_state(persistence, channel_capacity, SessionState::anonymous())
    }

    /// Creates a store seeded from durable storage.
    ///
    /// A persisted identity is loaded as known but unconfirmed: the store does not
    /// report `authenticated` until the backend confirms the session.
    pub fn hydrate(persistence: PersistenceAdapter, channel_capacity: usize) -> Self {
        let state = match persistence.load() {
            Ok(Some(identity)) => {
                info!(
                    "Hydrated {} identity {} from storage",
                    persistence.portal(),
                    identity.email
                );
                SessionState::unconfirmed(identity)
            }
            Ok(None) => SessionState::anonymous(),
            Err(e) => {
                warn!(
                    "Could not hydrate {} identity: {e} ({})",
                    persistence.portal(),
                    e.recovery_hint()
                );
                SessionState::anonymous()
            }
        };
        Self::with_state(persistence, channel_capacity, state)
    }

    fn with_state(
        persistence: PersistenceAdapter,
        channel_capacity: usize,
        state: SessionState,
    ) -> Self {
        let (changes, _) = broadcast::channel(channel_capacity.max(1));
        Self {
            portal: persistence.portal(),
            inner: Mutex::new(StoreInner {
                state,
                generation: 0,
            }),
            changes,
            persistence,
        }
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().state.identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().state.authenticated
    }

    /// Current role, if one is known and non-empty
    pub fn role(&self) -> Option<String> {
        self.lock().state.role().map(String::from)
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Receives one `SessionState` per applied change.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionState> {
        self.changes.subscribe()
    }

    /// Marks the session authenticated with `identity`.
    ///
    /// Returns `false` (no emission, no write) when the store already holds exactly
    /// this authenticated identity.
    pub fn set_authenticated(&self, identity: Identity) -> bool {
        let mut inner = self.lock();
        self.apply_authenticated(&mut inner, identity)
    }

    /// Commits a validation result started at `generation`.
    ///
    /// Returns `false` without touching the state when any mutation happened since,
    /// so a validation that raced a logout cannot resurrect the session.
    pub(crate) fn commit_validated(&self, identity: Identity, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                "Discarding stale {} validation (generation {} != {})",
                self.portal, generation, inner.generation
            );
            return false;
        }
        self.apply_authenticated(&mut inner, identity);
        true
    }

    /// Clears the session when no mutation happened since `generation`.
    pub(crate) fn clear_if_current(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        self.apply_clear(&mut inner);
        true
    }

    /// Drops the session and wipes durable storage.
    pub fn clear(&self) {
        let mut inner = self.lock();
        self.apply_clear(&mut inner);
    }

    fn apply_authenticated(&self, inner: &mut StoreInner, identity: Identity) -> bool {
        if inner.state.authenticated && inner.state.identity.as_ref() == Some(&identity) {
            return false;
        }

        if let Err(e) = self.persistence.save(&identity) {
            warn!("Failed to persist {} identity: {e}", self.portal);
        }

        inner.state = SessionState::authenticated(identity);
        inner.generation += 1;
        self.notify(&inner.state);
        true
    }

    fn apply_clear(&self, inner: &mut StoreInner) {
        if let Err(e) = self.persistence.clear() {
            warn!("Failed to wipe persisted {} identity: {e}", self.portal);
        }

        inner.generation += 1;
        if inner.state == SessionState::anonymous() {
            return;
        }

        inner.state = SessionState::anonymous();
        self.notify(&inner.state);
    }

    fn notify(&self, state: &SessionState) {
        // No receivers is fine
        let receivers = self.changes.send(state.clone()).unwrap_or(0);
        debug!(
            "{} session changed (authenticated={}, {} subscribers)",
            self.portal, state.authenticated, receivers
        );
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
