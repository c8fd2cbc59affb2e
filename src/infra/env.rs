use anyhow::Result;
use parking_lot::RwLock;

use super::app_config::AppConfig;
use crate::domain::{ConfigError, EnvInfo};
use crate::host::Env;
use crate::store::Action;

/// `Env` collaborator backed by the environment table in `AppConfig`.
#[derive(Debug, Default)]
pub struct ConfiguredEnv {
    config: RwLock<AppConfig>,
}

impl ConfiguredEnv {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    pub fn set_active(&self, name: &str) -> Result<(), ConfigError> {
        self.config.write().set_active(name)
    }

    /// Points the active environment at a different base URL.
    pub fn set_base_url(&self, base_url: &str) {
        let mut config = self.config.write();
        let name = config.active_env().name;
        config.env = name.clone();
        config.environments.insert(name, base_url.to_string());
    }

    /// Mirrors the pref write the add-on makes before sending an action that
    /// changes the environment. Call before dispatching.
    pub fn observe(&self, action: &Action) {
        if let Action::SetBaseUrl { url } = action {
            self.set_base_url(url);
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }
}

impl Env for ConfiguredEnv {
    fn get(&self) -> Result<EnvInfo> {
        Ok(self.config.read().active_env())
    }
}
