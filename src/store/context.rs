use std::sync::Arc;

use super::Store;
use super::action::Action;
use super::state::AppState;
use crate::host::{
    ChannelRegistry, Env, FeedbackManager, Hacks, InstallManager, Loader, MainUi, Tabs, Telemetry,
    WebApp,
};

pub type DispatchFn = Arc<dyn Fn(Action) + Send + Sync>;
pub type GetStateFn = Arc<dyn Fn() -> AppState + Send + Sync>;

/// Collaborator handles an effect runs against.
#[derive(Clone)]
pub struct Context {
    pub dispatch: DispatchFn,
    pub get_state: GetStateFn,
    pub env: Arc<dyn Env>,
    pub feedback_manager: Arc<dyn FeedbackManager>,
    pub hacks: Arc<dyn Hacks>,
    pub install_manager: Arc<dyn InstallManager>,
    pub loader: Arc<dyn Loader>,
    pub tabs: Arc<dyn Tabs>,
    pub telemetry: Arc<dyn Telemetry>,
    pub ui: Arc<dyn MainUi>,
    pub webapp: Arc<dyn WebApp>,
    pub channels: Arc<dyn ChannelRegistry>,
}

impl Context {
    /// Builds a context where one host object serves every collaborator.
    /// Individual fields can be swapped afterwards.
    pub fn from_host<H>(dispatch: DispatchFn, get_state: GetStateFn, host: Arc<H>) -> Self
    where
        H: Env
            + FeedbackManager
            + Hacks
            + InstallManager
            + Loader
            + Tabs
            + Telemetry
            + MainUi
            + WebApp
            + ChannelRegistry
            + 'static,
    {
        Self {
            dispatch,
            get_state,
            env: host.clone(),
            feedback_manager: host.clone(),
            hacks: host.clone(),
            install_manager: host.clone(),
            loader: host.clone(),
            tabs: host.clone(),
            telemetry: host.clone(),
            ui: host.clone(),
            webapp: host.clone(),
            channels: host,
        }
    }

    /// Like `from_host`, wiring `dispatch` and `get_state` to a store.
    pub fn for_store<H>(store: &Store, host: Arc<H>) -> Self
    where
        H: Env
            + FeedbackManager
            + Hacks
            + InstallManager
            + Loader
            + Tabs
            + Telemetry
            + MainUi
            + WebApp
            + ChannelRegistry
            + 'static,
    {
        Self::from_host(store.dispatcher(), store.state_getter(), host)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}
