use super::Via;
use crate::domain::EffectError;
use crate::store::context::Context;

const DOORHANGER_QUERY: &str = "/experiments?utm_source=testpilot-addon&utm_medium=firefox-browser&utm_campaign=testpilot-doorhanger&utm_content=not+badged";

pub const TOOLBAR_PING_ID: &str = "txp_toolbar_menu_1";

/// Landing page opened from the toolbar button.
pub fn doorhanger_url(base_url: &str) -> String {
    format!("{base_url}{DOORHANGER_QUERY}")
}

pub fn set_badge(ctx: &Context) -> Result<(), EffectError> {
    ctx.ui.set_badge().via("ui")
}

pub fn main_button_clicked(ctx: &Context) -> Result<(), EffectError> {
    ctx.ui.set_badge().via("ui")?;
    let base_url = (ctx.get_state)().base_url;
    ctx.tabs.open(&doorhanger_url(&base_url)).via("tabs")?;
    ctx.telemetry
        .ping(TOOLBAR_PING_ID, "clicked")
        .via("telemetry")
}
