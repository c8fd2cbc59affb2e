use super::Via;
use crate::domain::{EffectError, RatingPrompt};
use crate::store::context::Context;

pub fn prompt_rating(ctx: &Context, prompt: &RatingPrompt) -> Result<(), EffectError> {
    ctx.feedback_manager
        .prompt_rating(prompt)
        .via("feedback_manager")
}

pub fn set_rating(ctx: &Context, addon_id: &str, rating: u8) -> Result<(), EffectError> {
    ctx.telemetry
        .ping(addon_id, &format!("rated_{rating}"))
        .via("telemetry")
}

pub fn prompt_share(ctx: &Context, url: &str) -> Result<(), EffectError> {
    ctx.feedback_manager.prompt_share(url).via("feedback_manager")
}
