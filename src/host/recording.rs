use anyhow::{Result, bail};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;

use super::{
    ChannelRegistry, Env, FeedbackManager, Hacks, InstallManager, Loader, MainUi, Tabs, Telemetry,
    WebApp,
};
use crate::domain::{EnvInfo, Experiment, RatingPrompt};

/// One call made into a host collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    LoadExperiments { envname: String, base_url: String },
    Schedule,
    InstallExperiment { addon_id: String },
    UninstallExperiment { addon_id: String },
    UninstallSelf,
    SyncInstalled,
    Ping { id: String, event: String },
    PromptRating { addon_id: String, interval: u32 },
    PromptShare { url: String },
    ChangeEnv { name: String, base_url: String },
    SetBadge,
    OpenTab { url: String },
    HackEnabled { id: String },
    HackDisabled { id: String },
    ChannelAdded { id: String },
    ChannelRemoved { id: String },
}

impl HostCall {
    /// Stable name of the collaborator method, used by `RecordingHost::fail_on`.
    pub fn name(&self) -> &'static str {
        match self {
            HostCall::LoadExperiments { .. } => "load_experiments",
            HostCall::Schedule => "schedule",
            HostCall::InstallExperiment { .. } => "install_experiment",
            HostCall::UninstallExperiment { .. } => "uninstall_experiment",
            HostCall::UninstallSelf => "uninstall_self",
            HostCall::SyncInstalled => "sync_installed",
            HostCall::Ping { .. } => "ping",
            HostCall::PromptRating { .. } => "prompt_rating",
            HostCall::PromptShare { .. } => "prompt_share",
            HostCall::ChangeEnv { .. } => "change_env",
            HostCall::SetBadge => "set_badge",
            HostCall::OpenTab { .. } => "open_tab",
            HostCall::HackEnabled { .. } => "hack_enabled",
            HostCall::HackDisabled { .. } => "hack_disabled",
            HostCall::ChannelAdded { .. } => "channel_added",
            HostCall::ChannelRemoved { .. } => "channel_removed",
        }
    }
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCall::LoadExperiments { envname, base_url } => {
                write!(f, "loader.load_experiments({envname}, {base_url})")
            }
            HostCall::Schedule => write!(f, "loader.schedule()"),
            HostCall::InstallExperiment { addon_id } => {
                write!(f, "install_manager.install_experiment({addon_id})")
            }
            HostCall::UninstallExperiment { addon_id } => {
                write!(f, "install_manager.uninstall_experiment({addon_id})")
            }
            HostCall::UninstallSelf => write!(f, "install_manager.uninstall_self()"),
            HostCall::SyncInstalled => write!(f, "install_manager.sync_installed()"),
            HostCall::Ping { id, event } => write!(f, "telemetry.ping({id}, {event})"),
            HostCall::PromptRating { addon_id, interval } => {
                write!(f, "feedback_manager.prompt_rating({addon_id}, {interval})")
            }
            HostCall::PromptShare { url } => write!(f, "feedback_manager.prompt_share({url})"),
            HostCall::ChangeEnv { name, base_url } => {
                write!(f, "webapp.change_env({name}, {base_url})")
            }
            HostCall::SetBadge => write!(f, "ui.set_badge()"),
            HostCall::OpenTab { url } => write!(f, "tabs.open({url})"),
            HostCall::HackEnabled { id } => write!(f, "hacks.enabled({id})"),
            HostCall::HackDisabled { id } => write!(f, "hacks.disabled({id})"),
            HostCall::ChannelAdded { id } => write!(f, "channels.add({id})"),
            HostCall::ChannelRemoved { id } => write!(f, "channels.remove({id})"),
        }
    }
}

/// A host that records every collaborator call instead of performing it.
///
/// Serves every collaborator trait, so a single instance can back a whole
/// context. Used by the dry-run CLI and by tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    env: Mutex<EnvInfo>,
    failing: Mutex<Option<&'static str>>,
}

impl RecordingHost {
    pub fn new(env: EnvInfo) -> Self {
        Self {
            env: Mutex::new(env),
            ..Default::default()
        }
    }

    /// Changes what `Env::get` returns from now on.
    pub fn set_env(&self, env: EnvInfo) {
        *self.env.lock() = env;
    }

    /// Makes every subsequent call with the given `HostCall::name` fail.
    pub fn fail_on(&self, name: &'static str) {
        *self.failing.lock() = Some(name);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Returns the recorded calls and clears the log.
    pub fn take_calls(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    fn record(&self, call: HostCall) -> Result<()> {
        if *self.failing.lock() == Some(call.name()) {
            bail!("{} rejected by host", call.name());
        }
        log::debug!("[host] {call}");
        self.calls.lock().push(call);
        Ok(())
    }
}

impl Loader for RecordingHost {
    fn load_experiments(&self, envname: &str, base_url: &str) -> Result<()> {
        self.record(HostCall::LoadExperiments {
            envname: envname.to_string(),
            base_url: base_url.to_string(),
        })
    }

    fn schedule(&self) -> Result<()> {
        self.record(HostCall::Schedule)
    }
}

impl InstallManager for RecordingHost {
    fn install_experiment(&self, experiment: &Experiment) -> Result<()> {
        self.record(HostCall::InstallExperiment {
            addon_id: experiment.addon_id.clone(),
        })
    }

    fn uninstall_experiment(&self, experiment: &Experiment) -> Result<()> {
        self.record(HostCall::UninstallExperiment {
            addon_id: experiment.addon_id.clone(),
        })
    }

    fn uninstall_self(&self) -> Result<()> {
        self.record(HostCall::UninstallSelf)
    }

    fn sync_installed(&self) -> Result<()> {
        self.record(HostCall::SyncInstalled)
    }
}

impl Telemetry for RecordingHost {
    fn ping(&self, id: &str, event: &str) -> Result<()> {
        self.record(HostCall::Ping {
            id: id.to_string(),
            event: event.to_string(),
        })
    }
}

impl FeedbackManager for RecordingHost {
    fn prompt_rating(&self, prompt: &RatingPrompt) -> Result<()> {
        self.record(HostCall::PromptRating {
            addon_id: prompt.experiment.addon_id.clone(),
            interval: prompt.interval,
        })
    }

    fn prompt_share(&self, url: &str) -> Result<()> {
        self.record(HostCall::PromptShare {
            url: url.to_string(),
        })
    }
}

impl Env for RecordingHost {
    fn get(&self) -> Result<EnvInfo> {
        Ok(self.env.lock().clone())
    }
}

impl WebApp for RecordingHost {
    fn change_env(&self, env: &EnvInfo) -> Result<()> {
        self.record(HostCall::ChangeEnv {
            name: env.name.clone(),
            base_url: env.base_url.clone(),
        })
    }
}

impl MainUi for RecordingHost {
    fn set_badge(&self) -> Result<()> {
        self.record(HostCall::SetBadge)
    }
}

impl Tabs for RecordingHost {
    fn open(&self, url: &str) -> Result<()> {
        self.record(HostCall::OpenTab {
            url: url.to_string(),
        })
    }
}

impl Hacks for RecordingHost {
    fn enabled(&self, id: &str) -> Result<()> {
        self.record(HostCall::HackEnabled { id: id.to_string() })
    }

    fn disabled(&self, id: &str) -> Result<()> {
        self.record(HostCall::HackDisabled { id: id.to_string() })
    }
}

impl ChannelRegistry for RecordingHost {
    fn add(&self, id: &str) -> Result<()> {
        self.record(HostCall::ChannelAdded { id: id.to_string() })
    }

    fn remove(&self, id: &str) -> Result<()> {
        self.record(HostCall::ChannelRemoved { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order_and_drains() {
        let host = RecordingHost::default();
        host.schedule().unwrap();
        host.ping("txp", "clicked").unwrap();

        assert_eq!(host.calls().len(), 2);
        assert_eq!(
            host.take_calls(),
            vec![
                HostCall::Schedule,
                HostCall::Ping {
                    id: "txp".into(),
                    event: "clicked".into()
                }
            ]
        );
        assert!(host.calls().is_empty());
    }

    #[test]
    fn fail_on_rejects_only_the_named_method() {
        let host = RecordingHost::default();
        host.fail_on("ping");

        let err = host.ping("txp", "clicked").unwrap_err();
        assert!(err.to_string().contains("ping"));
        host.set_badge().unwrap();
        assert_eq!(host.calls(), vec![HostCall::SetBadge]);
    }

    #[test]
    fn env_is_read_without_recording() {
        let host = RecordingHost::new(EnvInfo::new("stage", "https://stage.example"));
        assert_eq!(host.get().unwrap().name, "stage");
        assert!(host.calls().is_empty());
    }

    #[test]
    fn calls_serialize_with_a_call_tag() {
        let json = serde_json::to_value(HostCall::OpenTab {
            url: "https://x".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "call": "open_tab", "url": "https://x" }));
        assert_eq!(HostCall::SetBadge.to_string(), "ui.set_badge()");
    }
}
