use serde::{Deserialize, Serialize};

use super::Experiment;

/// Payload of a rating prompt: which experiment to ask about and after how
/// many days of use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPrompt {
    pub experiment: Experiment,
    #[serde(default)]
    pub interval: u32,
}
