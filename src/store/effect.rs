use crate::domain::{Experiment, Experiments, RatingPrompt};

/// A deferred side effect selected from an action.
///
/// Effects are plain data; `runtime::run` performs them against a `Context`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Effect {
    #[default]
    Nothing,
    LoadExperiments {
        envname: String,
        base_url: String,
    },
    ExperimentEnabled {
        addon_id: String,
    },
    ExperimentDisabled {
        addon_id: String,
    },
    ExperimentsLoaded {
        experiments: Experiments,
    },
    InstallExperiment {
        experiment: Experiment,
    },
    UninstallExperiment {
        experiment: Experiment,
    },
    UninstallSelf,
    SyncInstalled,
    ChangeEnv,
    SetBaseUrl,
    PromptRating {
        prompt: RatingPrompt,
    },
    SetRating {
        addon_id: String,
        rating: u8,
    },
    SetBadge,
    MainButtonClicked,
    PromptShare {
        url: String,
    },
}

impl Effect {
    pub fn is_nothing(&self) -> bool {
        matches!(self, Effect::Nothing)
    }
}
