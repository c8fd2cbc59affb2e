use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{ConfigError, EnvInfo};

pub const DEFAULT_ENV: &str = "production";

const APP_DIR_NAME: &str = "txp-effects";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Name of the active environment.
    pub env: String,
    /// Environment name to web-app base URL.
    pub environments: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environments = [
            ("production", "https://testpilot.firefox.com"),
            ("stage", "https://testpilot.stage.mozaws.net"),
            ("dev", "https://testpilot.dev.mozaws.net"),
            ("local", "http://testpilot.dev:8000"),
        ]
        .into_iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect();

        Self {
            env: DEFAULT_ENV.to_string(),
            environments,
        }
    }
}

impl AppConfig {
    pub fn env_info(&self, name: &str) -> Option<EnvInfo> {
        self.environments
            .get(name)
            .map(|base_url| EnvInfo::new(name, base_url.clone()))
    }

    /// The active environment, falling back to production when the configured
    /// name is unknown.
    pub fn active_env(&self) -> EnvInfo {
        if let Some(env) = self.env_info(&self.env) {
            return env;
        }
        log::warn!("Unknown environment '{}', using {DEFAULT_ENV}", self.env);
        self.env_info(DEFAULT_ENV)
            .unwrap_or_else(|| EnvInfo::new(DEFAULT_ENV, "https://testpilot.firefox.com"))
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.environments.contains_key(name) {
            return Err(ConfigError::UnknownEnvironment(name.to_string()));
        }
        self.env = name.to_string();
        Ok(())
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

/// Reads a config file. Missing or unparseable files yield the defaults.
pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring invalid config {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).map_err(write_err)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TXP_EFFECTS_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

/// Per-user data directory: `TXP_EFFECTS_DATA_HOME`, else the platform's
/// application data location, else `.txp-effects` under the working directory.
fn app_data_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("TXP_EFFECTS_DATA_HOME") {
        return PathBuf::from(path);
    }

    platform_data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".txp-effects"))
}

fn platform_data_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return std::env::var_os("APPDATA").map(PathBuf::from);
    }
    if cfg!(target_os = "macos") {
        return home::home_dir().map(|home| home.join("Library").join("Application Support"));
    }
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".local").join("share")))
}
