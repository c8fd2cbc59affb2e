//! Host collaborators the effects layer calls into.
//!
//! Each trait mirrors one service object the add-on injects at startup. The
//! effects layer only calls these methods; what they do is up to the host.

mod channels;
mod recording;

pub use channels::WebExtensionChannels;
pub use recording::{HostCall, RecordingHost};

use anyhow::Result;

use crate::domain::{EnvInfo, Experiment, RatingPrompt};

/// Fetches experiment definitions and polls for updates.
pub trait Loader: Send + Sync {
    fn load_experiments(&self, envname: &str, base_url: &str) -> Result<()>;
    fn schedule(&self) -> Result<()>;
}

/// Owns the add-on install lifecycle.
pub trait InstallManager: Send + Sync {
    fn install_experiment(&self, experiment: &Experiment) -> Result<()>;
    fn uninstall_experiment(&self, experiment: &Experiment) -> Result<()>;
    fn uninstall_self(&self) -> Result<()>;
    fn sync_installed(&self) -> Result<()>;
}

pub trait Telemetry: Send + Sync {
    fn ping(&self, id: &str, event: &str) -> Result<()>;
}

/// Shows rating and share prompts.
pub trait FeedbackManager: Send + Sync {
    fn prompt_rating(&self, prompt: &RatingPrompt) -> Result<()>;
    fn prompt_share(&self, url: &str) -> Result<()>;
}

/// Resolves the active environment.
pub trait Env: Send + Sync {
    fn get(&self) -> Result<EnvInfo>;
}

/// The web-app shell running in the browser.
pub trait WebApp: Send + Sync {
    fn change_env(&self, env: &EnvInfo) -> Result<()>;
}

/// The toolbar button.
pub trait MainUi: Send + Sync {
    fn set_badge(&self) -> Result<()>;
}

pub trait Tabs: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Per-experiment workarounds toggled when an experiment turns on or off.
pub trait Hacks: Send + Sync {
    fn enabled(&self, id: &str) -> Result<()>;
    fn disabled(&self, id: &str) -> Result<()>;
}

/// Registry of messaging channels to web-extension experiments.
pub trait ChannelRegistry: Send + Sync {
    fn add(&self, id: &str) -> Result<()>;
    fn remove(&self, id: &str) -> Result<()>;
}
