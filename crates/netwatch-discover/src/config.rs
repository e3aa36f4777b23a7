//! Configuration for the netwatch monitor.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{DiscoverError, Result};

/// Top-level monitor configuration.
///
/// Loaded once at startup from a JSON file (default `config.json`), with
/// `NETWATCH__*` environment variables layered on top (e.g.
/// `NETWATCH__INTERFACE`). Immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Network interface whose ARP entries are scanned (e.g. "en0", "wlan0").
    pub interface: String,

    /// Webhook URL that receives notifications.
    pub discord_webhook: String,

    /// Also enumerate peers from `tailscale status`.
    #[serde(default)]
    pub enable_tailscale: bool,

    /// Location of the known-device cache file.
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Delay between the end of one cycle and the start of the next.
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,

    /// Timeout for each webhook request.
    #[serde(default = "default_notify_timeout")]
    pub notify_timeout_secs: u64,

    /// Path to the nmap binary used for OS fingerprinting.
    #[serde(default = "default_nmap_path")]
    pub nmap_path: String,
}

impl AppConfig {
    /// Load and validate configuration. Any failure is fatal to the caller.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| DiscoverError::Config(format!("non UTF-8 path: {}", path.display())))?;

        let cfg = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Json).required(true))
            .add_source(
                config::Environment::with_prefix("NETWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| DiscoverError::Config(e.to_string()))?;

        let app: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| DiscoverError::Config(e.to_string()))?;

        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<()> {
        if self.interface.trim().is_empty() {
            return Err(DiscoverError::Config("interface must not be empty".into()));
        }
        if !(self.discord_webhook.starts_with("http://")
            || self.discord_webhook.starts_with("https://"))
        {
            return Err(DiscoverError::Config(format!(
                "discord_webhook must be an http(s) URL, got {:?}",
                self.discord_webhook
            )));
        }
        if self.notify_timeout_secs == 0 {
            return Err(DiscoverError::Config(
                "notify_timeout_secs must be positive".into(),
            ));
        }
        if self.cache_file.trim().is_empty() {
            return Err(DiscoverError::Config("cache_file must not be empty".into()));
        }
        if self.scan_interval_secs == 0 {
            return Err(DiscoverError::Config(
                "scan_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_secs)
    }
}

fn default_cache_file() -> String {
    "data/known_devices.json".to_string()
}

fn default_scan_interval() -> u64 {
    60
}

fn default_notify_timeout() -> u64 {
    5
}

fn default_nmap_path() -> String {
    "nmap".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; every load in this module
    // takes this lock so an override set by one test is never seen by another.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_applies_defaults() {
        let _env = env_lock();
        let (_dir, path) = write_config(
            r#"{"interface": "wlan0", "discord_webhook": "https://discord.test/api/webhooks/1"}"#,
        );

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.interface, "wlan0");
        assert!(!config.enable_tailscale);
        assert_eq!(config.cache_file, "data/known_devices.json");
        assert_eq!(config.scan_interval(), Duration::from_secs(60));
        assert_eq!(config.notify_timeout(), Duration::from_secs(5));
        assert_eq!(config.nmap_path, "nmap");
    }

    #[test]
    fn test_load_full_config() {
        let _env = env_lock();
        let (_dir, path) = write_config(
            r#"{
                "interface": "en0",
                "discord_webhook": "https://discord.test/api/webhooks/2",
                "enable_tailscale": true,
                "cache_file": "/var/lib/netwatch/cache.json"
            }"#,
        );

        let config = AppConfig::load(&path).unwrap();
        assert!(config.enable_tailscale);
        assert_eq!(config.cache_file, "/var/lib/netwatch/cache.json");
    }

    #[test]
    fn test_missing_file_is_error() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(DiscoverError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let _env = env_lock();
        let (_dir, path) = write_config(r#"{"interface": "en0", "#);
        assert!(matches!(
            AppConfig::load(&path),
            Err(DiscoverError::Config(_))
        ));
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let _env = env_lock();
        let (_dir, path) = write_config(r#"{"interface": "en0"}"#);
        assert!(matches!(
            AppConfig::load(&path),
            Err(DiscoverError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_webhook() {
        let _env = env_lock();
        let (_dir, path) = write_config(r#"{"interface": "en0", "discord_webhook": "nope"}"#);
        assert!(matches!(
            AppConfig::load(&path),
            Err(DiscoverError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_zero_notify_timeout() {
        let _env = env_lock();
        let (_dir, path) = write_config(
            r#"{
                "interface": "en0",
                "discord_webhook": "https://discord.test/api/webhooks/1",
                "notify_timeout_secs": 0
            }"#,
        );
        assert!(matches!(
            AppConfig::load(&path),
            Err(DiscoverError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let _env = env_lock();
        let (_dir, path) = write_config(
            r#"{"interface": "en0", "discord_webhook": "https://discord.test/api/webhooks/1"}"#,
        );

        std::env::set_var("NETWATCH__INTERFACE", "wlan1");
        std::env::set_var("NETWATCH__SCAN_INTERVAL_SECS", "300");
        let result = AppConfig::load(&path);
        std::env::remove_var("NETWATCH__INTERFACE");
        std::env::remove_var("NETWATCH__SCAN_INTERVAL_SECS");

        let config = result.unwrap();
        assert_eq!(config.interface, "wlan1");
        assert_eq!(config.scan_interval(), Duration::from_secs(300));
    }
}
