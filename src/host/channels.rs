use anyhow::Result;
use parking_lot::Mutex;
use std::collections::BTreeSet;

use super::ChannelRegistry;

/// In-memory channel registry keyed by add-on id.
#[derive(Debug, Default)]
pub struct WebExtensionChannels {
    channels: Mutex<BTreeSet<String>>,
}

impl WebExtensionChannels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.channels.lock().contains(id)
    }

    /// Open channel ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.channels.lock().iter().cloned().collect()
    }
}

impl ChannelRegistry for WebExtensionChannels {
    fn add(&self, id: &str) -> Result<()> {
        if self.channels.lock().insert(id.to_string()) {
            log::debug!("Opened web-extension channel for {id}");
        }
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<()> {
        if self.channels.lock().remove(id) {
            log::debug!("Closed web-extension channel for {id}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_are_idempotent() {
        let channels = WebExtensionChannels::new();
        channels.add("b@x").unwrap();
        channels.add("a@x").unwrap();
        channels.add("a@x").unwrap();
        assert_eq!(channels.ids(), vec!["a@x".to_string(), "b@x".to_string()]);

        channels.remove("a@x").unwrap();
        channels.remove("a@x").unwrap();
        assert!(!channels.contains("a@x"));
        assert!(channels.contains("b@x"));
    }

    #[test]
    fn removing_an_unknown_channel_is_harmless() {
        let channels = WebExtensionChannels::new();
        channels.remove("nope").unwrap();
        assert!(channels.ids().is_empty());
    }
}
