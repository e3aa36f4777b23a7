//! Application context: everything a scan cycle needs, built once at startup.

use std::sync::Arc;

use netwatch_cache::DeviceCache;

use crate::config::AppConfig;
use crate::error::Result;
use crate::notify::{Notifier, WebhookNotifier};
use crate::probe::{
    ArpProbe, DeviceProbe, Enricher, NetworkNameSource, NmapEnricher, SsidLookup, TailscaleProbe,
};

/// Configuration, cache handle and capability implementations.
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub cache: DeviceCache,
    pub probe: Box<dyn DeviceProbe>,
    /// Secondary source; `None` unless `enable_tailscale` is set.
    pub mesh_probe: Option<Box<dyn DeviceProbe>>,
    pub enricher: Box<dyn Enricher>,
    pub notifier: Box<dyn Notifier>,
    pub network_name: Box<dyn NetworkNameSource>,
}

impl AppContext {
    /// Wire the system-command implementations for the given configuration.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let notifier = WebhookNotifier::new(&config.discord_webhook, config.notify_timeout())?;

        let mesh_probe: Option<Box<dyn DeviceProbe>> = if config.enable_tailscale {
            Some(Box::new(TailscaleProbe::new()))
        } else {
            None
        };

        Ok(Self {
            cache: DeviceCache::new(&config.cache_file),
            probe: Box::new(ArpProbe::new()),
            mesh_probe,
            enricher: Box::new(NmapEnricher::new(&config.nmap_path)),
            notifier: Box::new(notifier),
            network_name: Box::new(SsidLookup::new()),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enable_tailscale: bool) -> AppConfig {
        AppConfig {
            interface: "wlan0".to_string(),
            discord_webhook: "https://discord.test/api/webhooks/1".to_string(),
            enable_tailscale,
            cache_file: "data/known_devices.json".to_string(),
            scan_interval_secs: 60,
            notify_timeout_secs: 5,
            nmap_path: "nmap".to_string(),
        }
    }

    #[test]
    fn test_mesh_probe_follows_toggle() {
        assert!(AppContext::from_config(config(false))
            .unwrap()
            .mesh_probe
            .is_none());
        assert!(AppContext::from_config(config(true))
            .unwrap()
            .mesh_probe
            .is_some());
    }

    #[test]
    fn test_cache_path_from_config() {
        let ctx = AppContext::from_config(config(false)).unwrap();
        assert_eq!(
            ctx.cache.path(),
            std::path::Path::new("data/known_devices.json")
        );
    }
}
