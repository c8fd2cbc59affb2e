use super::Via;
use crate::domain::EffectError;
use crate::store::action::Action;
use crate::store::context::Context;

/// Tells the web app about the new environment and reloads experiments from it.
pub fn change_env(ctx: &Context) -> Result<(), EffectError> {
    let env = ctx.env.get().via("env")?;
    ctx.webapp.change_env(&env).via("webapp")?;
    (ctx.dispatch)(Action::LoadExperiments {
        envname: env.name,
        base_url: env.base_url,
    });
    Ok(())
}

/// Reloads experiments for the current environment from its base URL.
pub fn set_base_url(ctx: &Context) -> Result<(), EffectError> {
    let env = ctx.env.get().via("env")?;
    (ctx.dispatch)(Action::LoadExperiments {
        envname: env.name,
        base_url: env.base_url,
    });
    Ok(())
}
