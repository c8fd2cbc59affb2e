use chrono::Utc;

use super::Via;
use crate::domain::{EffectError, Experiment, Experiments};
use crate::store::action::Action;
use crate::store::context::Context;

pub fn load_experiments(ctx: &Context, envname: &str, base_url: &str) -> Result<(), EffectError> {
    ctx.loader.load_experiments(envname, base_url).via("loader")
}

pub fn experiment_enabled(ctx: &Context, addon_id: &str) -> Result<(), EffectError> {
    ctx.channels.add(addon_id).via("channels")?;
    ctx.telemetry.ping(addon_id, "enabled").via("telemetry")?;
    ctx.hacks.enabled(addon_id).via("hacks")
}

pub fn experiment_disabled(ctx: &Context, addon_id: &str) -> Result<(), EffectError> {
    ctx.channels.remove(addon_id).via("channels")?;
    ctx.telemetry.ping(addon_id, "disabled").via("telemetry")?;
    ctx.hacks.disabled(addon_id).via("hacks")
}

/// Schedules the next poll, then asks for every retired experiment to be
/// uninstalled.
pub fn experiments_loaded(ctx: &Context, experiments: &Experiments) -> Result<(), EffectError> {
    ctx.loader.schedule().via("loader")?;

    let now = Utc::now();
    for experiment in experiments.values().filter(|x| x.is_retired(now)) {
        log::debug!("Experiment {} is retired, uninstalling", experiment.addon_id);
        (ctx.dispatch)(Action::UninstallExperiment {
            experiment: experiment.clone(),
        });
    }
    Ok(())
}

pub fn install_experiment(ctx: &Context, experiment: &Experiment) -> Result<(), EffectError> {
    ctx.install_manager
        .install_experiment(experiment)
        .via("install_manager")
}

pub fn uninstall_experiment(ctx: &Context, experiment: &Experiment) -> Result<(), EffectError> {
    ctx.install_manager
        .uninstall_experiment(experiment)
        .via("install_manager")
}

pub fn uninstall_self(ctx: &Context) -> Result<(), EffectError> {
    ctx.install_manager.uninstall_self().via("install_manager")
}

pub fn sync_installed(ctx: &Context) -> Result<(), EffectError> {
    ctx.install_manager.sync_installed().via("install_manager")
}
