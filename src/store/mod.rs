//! Reducer-style store plus the side-effect dispatcher that runs after it.

mod action;
mod context;
mod effect;
mod reducer;
pub mod runtime;
mod side_effects;
mod state;

pub use action::Action;
pub use context::{Context, DispatchFn, GetStateFn};
pub use effect::Effect;
pub use reducer::{reduce, select};
pub use side_effects::SideEffects;
pub use state::AppState;

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::domain::{DispatchError, EffectError};

type Listener = Arc<dyn Fn(&Store) -> Result<(), EffectError> + Send + Sync>;

struct Inner {
    state: Mutex<AppState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    queue: Mutex<VecDeque<Action>>,
    dispatching: AtomicBool,
}

/// Holds app state and notifies subscribers after every action.
///
/// Cloning yields another handle to the same store. Actions dispatched while a
/// notification round is running are queued and handled, in order, once the
/// round finishes.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

/// Token returned by `Store::subscribe`. Dropping it keeps the listener.
#[derive(Debug, Default)]
pub struct Unsubscribe {
    target: Option<(Weak<Inner>, u64)>,
}

impl Unsubscribe {
    /// A token that does nothing.
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn unsubscribe(self) {
        let Some((inner, id)) = self.target else {
            return;
        };
        if let Some(inner) = inner.upgrade() {
            inner.listeners.lock().retain(|(listener_id, _)| *listener_id != id);
        }
    }
}

struct DispatchingGuard<'a>(&'a Inner);

impl Drop for DispatchingGuard<'_> {
    fn drop(&mut self) {
        // Actions queued by a panicking round must not leak into the next one.
        if std::thread::panicking() {
            self.0.queue.lock().clear();
        }
        self.0.dispatching.store(false, Ordering::Release);
    }
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(initial_state),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                queue: Mutex::new(VecDeque::new()),
                dispatching: AtomicBool::new(false),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.lock().clone()
    }

    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn(&Store) -> Result<(), EffectError> + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        Unsubscribe {
            target: Some((Arc::downgrade(&self.inner), id)),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Reduces the action and notifies every listener.
    ///
    /// Called from inside a listener, the action is queued and this returns
    /// `Ok(())` at once; the outermost call reports its outcome.
    pub fn dispatch(&self, action: Action) -> Result<(), DispatchError> {
        self.inner.queue.lock().push_back(action);
        loop {
            if self.inner.dispatching.swap(true, Ordering::AcqRel) {
                return Ok(());
            }
            let result = {
                let _guard = DispatchingGuard(&self.inner);
                self.drain()
            };
            // Another thread may have queued between the last pop and the
            // flag reset; it returned early, so its action is ours to run.
            if result.is_err() || self.inner.queue.lock().is_empty() {
                return result;
            }
        }
    }

    fn drain(&self) -> Result<(), DispatchError> {
        loop {
            let Some(action) = self.inner.queue.lock().pop_front() else {
                return Ok(());
            };

            reducer::reduce(&mut self.inner.state.lock(), &action);

            let listeners: Vec<Listener> = self
                .inner
                .listeners
                .lock()
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect();

            for listener in listeners {
                if let Err(source) = listener(self) {
                    let dropped = {
                        let mut queue = self.inner.queue.lock();
                        let dropped = queue.len();
                        queue.clear();
                        dropped
                    };
                    if dropped > 0 {
                        log::warn!(
                            "Dropping {dropped} queued action(s) after {} failed",
                            action.action_type()
                        );
                    }
                    return Err(DispatchError::Listener {
                        action_type: action.action_type().to_string(),
                        source,
                    });
                }
            }
        }
    }

    /// Dispatch function that does not keep the store alive.
    pub fn dispatcher(&self) -> DispatchFn {
        let inner = Arc::downgrade(&self.inner);
        Arc::new(move |action: Action| {
            let Some(inner) = inner.upgrade() else {
                log::warn!("Store dropped, ignoring {}", action.action_type());
                return;
            };
            if let Err(err) = (Store { inner }).dispatch(action) {
                log::error!("Dispatch failed: {err}");
            }
        })
    }

    /// State getter that does not keep the store alive. Returns the default
    /// state once the store is gone.
    pub fn state_getter(&self) -> GetStateFn {
        let inner = Arc::downgrade(&self.inner);
        Arc::new(move || {
            inner
                .upgrade()
                .map(|inner| inner.state.lock().clone())
                .unwrap_or_default()
        })
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.lock())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
