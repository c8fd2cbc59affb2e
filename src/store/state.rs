use crate::domain::{EnvInfo, Experiments};

use super::effect::Effect;

/// Store state the effects layer reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub env: String,
    pub base_url: String,
    pub experiments: Experiments,
    /// Effect selected by the most recent action.
    pub side_effects: Effect,
}

impl AppState {
    pub fn new(env: &EnvInfo) -> Self {
        Self {
            env: env.name.clone(),
            base_url: env.base_url.clone(),
            ..Default::default()
        }
    }
}
