use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{ActionError, Experiment, Experiments, RatingPrompt};

/// Actions flowing through the add-on store.
///
/// Wire shape is `{ "type": "SCREAMING_SNAKE", "payload": { ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadExperiments { envname: String, base_url: String },
    ExperimentsLoaded { experiments: Experiments },
    ExperimentEnabled { experiment: Experiment },
    ExperimentDisabled { experiment: Experiment },
    ExperimentUninstalling { experiment: Experiment },
    ExperimentUninstalled { experiment: Experiment },
    InstallStarted { experiment: Experiment },
    InstallEnded { experiment: Experiment },
    InstallExperiment { experiment: Experiment },
    UninstallExperiment { experiment: Experiment },
    UninstallSelf,
    GetInstalled,
    AddonsChanged,
    ChangeEnv,
    SetBaseUrl { url: String },
    ShowRatingPrompt(RatingPrompt),
    SetRating { experiment: Experiment, rating: u8 },
    SetBadge,
    MainButtonClicked,
    PromptShare { url: String },
    /// Any `type` this crate does not know about.
    Unknown { action_type: String },
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadExperimentsPayload {
    envname: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ExperimentsLoadedPayload {
    experiments: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct ExperimentPayload {
    experiment: Experiment,
}

#[derive(Deserialize)]
struct UrlPayload {
    url: String,
}

#[derive(Deserialize)]
struct RatingPayload {
    experiment: Experiment,
    rating: u8,
}

impl Action {
    pub fn from_json(raw: &str) -> Result<Self, ActionError> {
        let value: Value = serde_json::from_str(raw).map_err(ActionError::Malformed)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ActionError> {
        let RawAction {
            action_type,
            payload: body,
        } = serde_json::from_value(value).map_err(ActionError::Malformed)?;
        let ty = action_type.as_str();

        let action = match ty {
            "LOAD_EXPERIMENTS" => {
                let p: LoadExperimentsPayload = payload(ty, body)?;
                Action::LoadExperiments {
                    envname: p.envname,
                    base_url: p.base_url,
                }
            }
            "EXPERIMENTS_LOADED" => Action::ExperimentsLoaded {
                experiments: experiments(payload::<ExperimentsLoadedPayload>(ty, body)?),
            },
            "EXPERIMENT_ENABLED" => Action::ExperimentEnabled {
                experiment: experiment(ty, body)?,
            },
            "EXPERIMENT_DISABLED" => Action::ExperimentDisabled {
                experiment: experiment(ty, body)?,
            },
            "EXPERIMENT_UNINSTALLING" => Action::ExperimentUninstalling {
                experiment: experiment(ty, body)?,
            },
            "EXPERIMENT_UNINSTALLED" => Action::ExperimentUninstalled {
                experiment: experiment(ty, body)?,
            },
            "INSTALL_STARTED" => Action::InstallStarted {
                experiment: experiment(ty, body)?,
            },
            "INSTALL_ENDED" => Action::InstallEnded {
                experiment: experiment(ty, body)?,
            },
            "INSTALL_EXPERIMENT" => Action::InstallExperiment {
                experiment: experiment(ty, body)?,
            },
            "UNINSTALL_EXPERIMENT" => Action::UninstallExperiment {
                experiment: experiment(ty, body)?,
            },
            "UNINSTALL_SELF" => Action::UninstallSelf,
            "GET_INSTALLED" => Action::GetInstalled,
            "ADDONS_CHANGED" => Action::AddonsChanged,
            "CHANGE_ENV" => Action::ChangeEnv,
            "SET_BASE_URL" => Action::SetBaseUrl {
                url: payload::<UrlPayload>(ty, body)?.url,
            },
            "SHOW_RATING_PROMPT" => Action::ShowRatingPrompt(payload(ty, body)?),
            "SET_RATING" => {
                let p: RatingPayload = payload(ty, body)?;
                Action::SetRating {
                    experiment: p.experiment,
                    rating: p.rating,
                }
            }
            "SET_BADGE" => Action::SetBadge,
            "MAIN_BUTTON_CLICKED" => Action::MainButtonClicked,
            "PROMPT_SHARE" => Action::PromptShare {
                url: payload::<UrlPayload>(ty, body)?.url,
            },
            _ => Action::Unknown {
                action_type: action_type.clone(),
            },
        };
        Ok(action)
    }

    /// The wire `type` tag of this action.
    pub fn action_type(&self) -> &str {
        match self {
            Action::LoadExperiments { .. } => "LOAD_EXPERIMENTS",
            Action::ExperimentsLoaded { .. } => "EXPERIMENTS_LOADED",
            Action::ExperimentEnabled { .. } => "EXPERIMENT_ENABLED",
            Action::ExperimentDisabled { .. } => "EXPERIMENT_DISABLED",
            Action::ExperimentUninstalling { .. } => "EXPERIMENT_UNINSTALLING",
            Action::ExperimentUninstalled { .. } => "EXPERIMENT_UNINSTALLED",
            Action::InstallStarted { .. } => "INSTALL_STARTED",
            Action::InstallEnded { .. } => "INSTALL_ENDED",
            Action::InstallExperiment { .. } => "INSTALL_EXPERIMENT",
            Action::UninstallExperiment { .. } => "UNINSTALL_EXPERIMENT",
            Action::UninstallSelf => "UNINSTALL_SELF",
            Action::GetInstalled => "GET_INSTALLED",
            Action::AddonsChanged => "ADDONS_CHANGED",
            Action::ChangeEnv => "CHANGE_ENV",
            Action::SetBaseUrl { .. } => "SET_BASE_URL",
            Action::ShowRatingPrompt(_) => "SHOW_RATING_PROMPT",
            Action::SetRating { .. } => "SET_RATING",
            Action::SetBadge => "SET_BADGE",
            Action::MainButtonClicked => "MAIN_BUTTON_CLICKED",
            Action::PromptShare { .. } => "PROMPT_SHARE",
            Action::Unknown { action_type } => action_type,
        }
    }
}

fn payload<T: DeserializeOwned>(action_type: &str, body: Value) -> Result<T, ActionError> {
    serde_json::from_value(body).map_err(|source| ActionError::InvalidPayload {
        action_type: action_type.to_string(),
        source,
    })
}

/// Decodes each record on its own; a malformed record is skipped, not fatal.
fn experiments(payload: ExperimentsLoadedPayload) -> Experiments {
    payload
        .experiments
        .into_iter()
        .filter_map(|(id, record)| match serde_json::from_value(record) {
            Ok(experiment) => Some((id, experiment)),
            Err(err) => {
                log::warn!("Skipping malformed experiment {id}: {err}");
                None
            }
        })
        .collect()
}

fn experiment(action_type: &str, body: Value) -> Result<Experiment, ActionError> {
    payload::<ExperimentPayload>(action_type, body).map(|p| p.experiment)
}
