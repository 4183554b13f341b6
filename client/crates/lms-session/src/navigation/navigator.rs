use crate::Redirect;

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

/// The host's location bar.
///
/// Guards and interceptors read the current location and issue redirects through
/// this seam; they never own navigation state themselves.
pub trait Navigator: Send + Sync {
    /// Current location as path plus query
    fn current_location(&self) -> String;

    fn set_location(&self, location: String);

    fn redirect(&self, redirect: &Redirect) {
        self.set_location(redirect.to_url());
    }
}

struct NavigatorState {
    location: String,
    history: Vec<String>,
}

/// In-process [`Navigator`] recording every location it was sent to.
pub struct MemoryNavigator {
    state: Mutex<NavigatorState>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(NavigatorState {
                location: initial.into(),
                history: Vec::new(),
            }),
        }
    }

    /// Locations set since construction, oldest first
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NavigatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_location(&self) -> String {
        self.lock().location.clone()
    }

    fn set_location(&self, location: String) {
        debug!("Navigating to {location}");
        let mut state = self.lock();
        state.history.push(location.clone());
        state.location = location;
    }
}
