use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use super::context::Context;
use super::runtime;
use super::{Store, Unsubscribe};

/// Runs the store's selected effect against the current context after every
/// state change.
///
/// Owned by whoever composes the add-on: call `set_context` once the
/// collaborators exist, then `enable` with the store.
#[derive(Debug, Default)]
pub struct SideEffects {
    context: Arc<RwLock<Option<Context>>>,
    unsubscribe: Mutex<Unsubscribe>,
}

impl SideEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole context. Listeners pick it up on the next notification.
    pub fn set_context(&self, ctx: Context) {
        *self.context.write() = Some(ctx);
    }

    pub fn has_context(&self) -> bool {
        self.context.read().is_some()
    }

    /// Subscribes to `store`. A previous subscription is released first.
    pub fn enable(&self, store: &Store) {
        let context = self.context.clone();
        let token = store.subscribe(move |store| {
            let effect = store.state().side_effects;
            if effect.is_nothing() {
                return Ok(());
            }
            let Some(ctx) = context.read().clone() else {
                log::warn!("No context set, skipping {effect:?}");
                return Ok(());
            };
            log::debug!("Running {effect:?}");
            runtime::run(&effect, &ctx)
        });

        let previous = std::mem::replace(&mut *self.unsubscribe.lock(), token);
        previous.unsubscribe();
    }

    /// Releases the subscription. Safe to call repeatedly or before `enable`.
    pub fn disable(&self) {
        let token = std::mem::take(&mut *self.unsubscribe.lock());
        token.unsubscribe();
    }
}
