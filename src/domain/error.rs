//! Error types for the effects layer.
//!
//! Collaborators report failures as `anyhow::Error`; these types record where
//! the failure surfaced so the store can hand it back to the dispatcher.

use thiserror::Error;

/// Errors decoding an action from its `{ type, payload }` wire shape.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Malformed action: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Invalid payload for {action_type}: {source}")]
    InvalidPayload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A collaborator call made by an effect failed.
#[derive(Debug, Error)]
#[error("{collaborator} call failed: {source}")]
pub struct EffectError {
    pub collaborator: &'static str,
    #[source]
    pub source: anyhow::Error,
}

/// Errors surfaced by `Store::dispatch`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Listener failed while handling {action_type}: {source}")]
    Listener {
        action_type: String,
        #[source]
        source: EffectError,
    },
}

/// Errors related to environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Failed to write config to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
