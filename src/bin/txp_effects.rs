//! txp-effects CLI entry point.
//!
//! Replays a JSON-lines stream of add-on actions through the store with the
//! effect dispatcher enabled, printing every host call the effects make.

use anyhow::{Context as _, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use testpilot_effects::host::{Env, RecordingHost, WebExtensionChannels};
use testpilot_effects::infra::app_config::{
    load_config, load_config_from, save_config, save_config_to,
};
use testpilot_effects::infra::env::ConfiguredEnv;
use testpilot_effects::store::{Action, AppState, Context, SideEffects, Store};

#[derive(Parser, Debug)]
#[command(name = "txp-effects")]
#[command(version)]
#[command(about = "Dry-run Test Pilot add-on actions through the effect dispatcher", long_about = None)]
struct Args {
    /// Config file (defaults to the platform data dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment to start in (production, stage, dev, local, ...)
    #[arg(short, long)]
    env: Option<String>,

    /// Override the active environment's base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Print host calls as JSON objects
    #[arg(long)]
    json: bool,

    /// Persist --env and --base-url to the config file before replaying
    #[arg(long)]
    save: bool,

    /// JSON-lines file of actions, or `-` for stdin
    #[arg(default_value = "-")]
    actions: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let env = Arc::new(ConfiguredEnv::new(config));
    if let Some(name) = &args.env {
        env.set_active(name)?;
    }
    if let Some(base_url) = &args.base_url {
        env.set_base_url(base_url);
    }
    if args.save {
        let config = env.config();
        match &args.config {
            Some(path) => save_config_to(&config, path)?,
            None => save_config(&config)?,
        }
        log::info!("Saved environment {}", config.env);
    }
    let initial = env.get()?;
    log::info!("Environment {} at {}", initial.name, initial.base_url);

    let store = Store::new(AppState::new(&initial));
    let host = Arc::new(RecordingHost::new(initial));
    let channels = Arc::new(WebExtensionChannels::new());

    let mut ctx = Context::for_store(&store, host.clone());
    ctx.env = env.clone();
    ctx.channels = channels.clone();

    let side_effects = SideEffects::new();
    side_effects.set_context(ctx);
    side_effects.enable(&store);

    let input = read_actions(&args.actions)?;
    let mut dispatched = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let action = Action::from_json(line)
            .with_context(|| format!("Failed to parse action on line {}", index + 1))?;
        log::debug!("Dispatching {}", action.action_type());
        env.observe(&action);
        store
            .dispatch(action)
            .with_context(|| format!("Action on line {} failed", index + 1))?;
        dispatched += 1;

        for call in host.take_calls() {
            if args.json {
                println!("{}", serde_json::to_string(&call)?);
            } else {
                println!("{call}");
            }
        }
    }

    side_effects.disable();
    log::info!(
        "Dispatched {dispatched} action(s); open channels: {:?}",
        channels.ids()
    );
    Ok(())
}

fn read_actions(source: &str) -> Result<String> {
    if source == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read actions from stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
}
