pub mod env;
pub mod experiments;
pub mod feedback;
pub mod ui;


use super::context::Context;
use super::effect::Effect;
use crate::domain::EffectError;

/// Performs an effect against the given context.
///
/// Collaborator failures stop the effect at the failing call.
pub fn run(effect: &Effect, ctx: &Context) -> Result<(), EffectError> {
    match effect {
        Effect::Nothing => Ok(()),
        Effect::LoadExperiments { envname, base_url } => {
            experiments::load_experiments(ctx, envname, base_url)
        }
        Effect::ExperimentEnabled { addon_id } => experiments::experiment_enabled(ctx, addon_id),
        Effect::ExperimentDisabled { addon_id } => experiments::experiment_disabled(ctx, addon_id),
        Effect::ExperimentsLoaded { experiments } => {
            experiments::experiments_loaded(ctx, experiments)
        }
        Effect::InstallExperiment { experiment } => {
            experiments::install_experiment(ctx, experiment)
        }
        Effect::UninstallExperiment { experiment } => {
            experiments::uninstall_experiment(ctx, experiment)
        }
        Effect::UninstallSelf => experiments::uninstall_self(ctx),
        Effect::SyncInstalled => experiments::sync_installed(ctx),
        Effect::ChangeEnv => env::change_env(ctx),
        Effect::SetBaseUrl => env::set_base_url(ctx),
        Effect::PromptRating { prompt } => feedback::prompt_rating(ctx, prompt),
        Effect::SetRating { addon_id, rating } => feedback::set_rating(ctx, addon_id, *rating),
        Effect::SetBadge => ui::set_badge(ctx),
        Effect::MainButtonClicked => ui::main_button_clicked(ctx),
        Effect::PromptShare { url } => feedback::prompt_share(ctx, url),
    }
}

/// Tags a collaborator result with the collaborator's name.
pub(crate) trait Via<T> {
    fn via(self, collaborator: &'static str) -> Result<T, EffectError>;
}

impl<T> Via<T> for anyhow::Result<T> {
    fn via(self, collaborator: &'static str) -> Result<T, EffectError> {
        self.map_err(|source| EffectError {
            collaborator,
            source,
        })
    }
}
