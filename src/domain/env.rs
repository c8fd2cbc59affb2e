use serde::{Deserialize, Serialize};

/// The environment the add-on talks to: a name and the web-app base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvInfo {
    pub name: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}

impl EnvInfo {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
        }
    }
}
