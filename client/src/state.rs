use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::state::{Action, AppState};
use tokio::sync::watch;

/// Shared handle to the controller's [`AppState`].
///
/// The lock is only held for the duration of a transition, never across an
/// await. Every applied action bumps a version that subscribers can wait on.
#[derive(Clone)]
pub struct StateHandle {
    inner: Arc<Mutex<AppState>>,
    changes: Arc<watch::Sender<u64>>,
}

impl StateHandle {
    pub fn new(state: AppState) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(state)),
            changes: Arc::new(changes),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apply(&self, action: Action) {
        self.lock().apply(action);
        self.changes.send_modify(|version| *version += 1);
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.lock())
    }

    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
