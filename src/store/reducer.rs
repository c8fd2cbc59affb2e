use super::action::Action;
use super::effect::Effect;
use super::state::AppState;

/// Picks the effect an action triggers. Pure: no context, no I/O.
pub fn select(action: &Action) -> Effect {
    match action {
        Action::LoadExperiments { envname, base_url } => Effect::LoadExperiments {
            envname: envname.clone(),
            base_url: base_url.clone(),
        },
        Action::ExperimentEnabled { experiment } | Action::InstallEnded { experiment } => {
            Effect::ExperimentEnabled {
                addon_id: experiment.addon_id.clone(),
            }
        }
        Action::ExperimentDisabled { experiment }
        | Action::ExperimentUninstalling { experiment } => Effect::ExperimentDisabled {
            addon_id: experiment.addon_id.clone(),
        },
        Action::ExperimentsLoaded { experiments } => Effect::ExperimentsLoaded {
            experiments: experiments.clone(),
        },
        Action::InstallExperiment { experiment } => Effect::InstallExperiment {
            experiment: experiment.clone(),
        },
        Action::UninstallExperiment { experiment } => Effect::UninstallExperiment {
            experiment: experiment.clone(),
        },
        Action::UninstallSelf => Effect::UninstallSelf,
        Action::GetInstalled | Action::AddonsChanged => Effect::SyncInstalled,
        Action::ChangeEnv => Effect::ChangeEnv,
        Action::SetBaseUrl { .. } => Effect::SetBaseUrl,
        Action::ShowRatingPrompt(prompt) => Effect::PromptRating {
            prompt: prompt.clone(),
        },
        Action::SetRating { experiment, rating } => Effect::SetRating {
            addon_id: experiment.addon_id.clone(),
            rating: *rating,
        },
        Action::SetBadge => Effect::SetBadge,
        Action::MainButtonClicked => Effect::MainButtonClicked,
        Action::PromptShare { url } => Effect::PromptShare { url: url.clone() },
        Action::ExperimentUninstalled { .. }
        | Action::InstallStarted { .. }
        | Action::Unknown { .. } => Effect::Nothing,
    }
}

/// Root reducer: records the selected effect and the few fields it depends on.
pub fn reduce(state: &mut AppState, action: &Action) {
    state.side_effects = select(action);

    match action {
        Action::LoadExperiments { envname, base_url } => {
            state.env = envname.clone();
            state.base_url = base_url.clone();
        }
        Action::SetBaseUrl { url } => {
            state.base_url = url.clone();
        }
        Action::ExperimentsLoaded { experiments } => {
            state.experiments = experiments.clone();
        }
        _ => {}
    }
}
