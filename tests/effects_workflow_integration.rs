//! Integration tests for the effect dispatcher wired to a live store.
//! These drive actions end to end and check which host calls come out.

use std::sync::Arc;

use testpilot_effects::domain::{DispatchError, EnvInfo};
use testpilot_effects::host::{HostCall, RecordingHost, WebExtensionChannels};
use testpilot_effects::infra::app_config::AppConfig;
use testpilot_effects::infra::env::ConfiguredEnv;
use testpilot_effects::store::{Action, AppState, Context, Effect, SideEffects, Store};

struct Rig {
    store: Store,
    host: Arc<RecordingHost>,
    side_effects: SideEffects,
}

fn rig() -> Rig {
    let env = EnvInfo::new("production", "https://testpilot.firefox.com");
    let store = Store::new(AppState::new(&env));
    let host = Arc::new(RecordingHost::new(env));
    let side_effects = SideEffects::new();
    side_effects.set_context(Context::for_store(&store, host.clone()));
    side_effects.enable(&store);
    Rig {
        store,
        host,
        side_effects,
    }
}

#[test]
fn test_retired_experiments_are_uninstalled_through_the_store() -> anyhow::Result<()> {
    let rig = rig();

    let action = Action::from_json(
        r#"{"type":"EXPERIMENTS_LOADED","payload":{"experiments":{
            "a":{"addon_id":"a","uninstalled":"2000-01-01"},
            "b":{"addon_id":"b","uninstalled":"2999-01-01"},
            "c":{"addon_id":"c"}
        }}}"#,
    )?;
    rig.store.dispatch(action)?;

    assert_eq!(
        rig.host.calls(),
        vec![
            HostCall::Schedule,
            HostCall::UninstallExperiment {
                addon_id: "a".into()
            },
        ]
    );
    assert_eq!(rig.store.state().experiments.len(), 3);
    Ok(())
}

#[test]
fn test_change_env_reloads_from_the_new_environment() -> anyhow::Result<()> {
    let rig = rig();
    let config = AppConfig::default();
    let env = Arc::new(ConfiguredEnv::new(config));
    env.set_active("stage")?;

    let mut ctx = Context::for_store(&rig.store, rig.host.clone());
    ctx.env = env;
    rig.side_effects.set_context(ctx);

    rig.store.dispatch(Action::ChangeEnv)?;

    let stage = "https://testpilot.stage.mozaws.net";
    assert_eq!(
        rig.host.calls(),
        vec![
            HostCall::ChangeEnv {
                name: "stage".into(),
                base_url: stage.into()
            },
            HostCall::LoadExperiments {
                envname: "stage".into(),
                base_url: stage.into()
            },
        ]
    );
    let state = rig.store.state();
    assert_eq!(state.env, "stage");
    assert_eq!(state.base_url, stage);
    Ok(())
}

#[test]
fn test_main_button_uses_base_url_from_state() -> anyhow::Result<()> {
    let rig = rig();
    rig.host
        .set_env(EnvInfo::new("production", "http://localhost:8000"));
    rig.store.dispatch(Action::SetBaseUrl {
        url: "http://localhost:8000".into(),
    })?;
    rig.host.take_calls();

    rig.store.dispatch(Action::MainButtonClicked)?;

    assert_eq!(
        rig.host.calls(),
        vec![
            HostCall::SetBadge,
            HostCall::OpenTab {
                url: "http://localhost:8000/experiments?utm_source=testpilot-addon&utm_medium=firefox-browser&utm_campaign=testpilot-doorhanger&utm_content=not+badged".into()
            },
            HostCall::Ping {
                id: "txp_toolbar_menu_1".into(),
                event: "clicked".into()
            },
        ]
    );
    Ok(())
}

#[test]
fn test_set_base_url_reaches_the_configured_env() -> anyhow::Result<()> {
    let rig = rig();
    let env = Arc::new(ConfiguredEnv::new(AppConfig::default()));
    let mut ctx = Context::for_store(&rig.store, rig.host.clone());
    ctx.env = env.clone();
    rig.side_effects.set_context(ctx);

    let actions = [
        r#"{"type":"SET_BASE_URL","payload":{"url":"http://localhost:8000"}}"#,
        r#"{"type":"MAIN_BUTTON_CLICKED"}"#,
    ];
    for raw in actions {
        let action = Action::from_json(raw)?;
        env.observe(&action);
        rig.store.dispatch(action)?;
    }

    let calls = rig.host.calls();
    assert_eq!(
        calls[0],
        HostCall::LoadExperiments {
            envname: "production".into(),
            base_url: "http://localhost:8000".into()
        }
    );
    assert!(calls.contains(&HostCall::OpenTab {
        url: "http://localhost:8000/experiments?utm_source=testpilot-addon&utm_medium=firefox-browser&utm_campaign=testpilot-doorhanger&utm_content=not+badged".into()
    }));
    assert_eq!(rig.store.state().base_url, "http://localhost:8000");
    Ok(())
}

#[test]
fn test_channels_follow_enable_and_disable() -> anyhow::Result<()> {
    let rig = rig();
    let channels = Arc::new(WebExtensionChannels::new());
    let mut ctx = Context::for_store(&rig.store, rig.host.clone());
    ctx.channels = channels.clone();
    rig.side_effects.set_context(ctx);

    rig.store.dispatch(Action::from_json(
        r#"{"type":"INSTALL_ENDED","payload":{"experiment":{"addon_id":"@x"}}}"#,
    )?)?;
    assert!(channels.contains("@x"));

    rig.store.dispatch(Action::from_json(
        r#"{"type":"EXPERIMENT_DISABLED","payload":{"experiment":{"addon_id":"@x"}}}"#,
    )?)?;
    assert!(!channels.contains("@x"));
    Ok(())
}

#[test]
fn test_failures_surface_from_dispatch() {
    let rig = rig();
    rig.host.fail_on("sync_installed");

    let err = rig.store.dispatch(Action::AddonsChanged).unwrap_err();

    let DispatchError::Listener {
        action_type,
        source,
    } = err;
    assert_eq!(action_type, "ADDONS_CHANGED");
    assert_eq!(source.collaborator, "install_manager");
    assert_eq!(rig.store.state().side_effects, Effect::SyncInstalled);
}

#[test]
fn test_disabled_dispatcher_ignores_actions() -> anyhow::Result<()> {
    let rig = rig();
    rig.side_effects.disable();
    rig.side_effects.disable();

    rig.store.dispatch(Action::UninstallSelf)?;
    rig.store.dispatch(Action::from_json(r#"{"type":"WHO_KNOWS"}"#)?)?;

    assert!(rig.host.calls().is_empty());
    assert_eq!(rig.store.listener_count(), 0);
    Ok(())
}
