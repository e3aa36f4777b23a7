//! Tailscale mesh probe.
//!
//! Mesh peers have no MAC, so each one gets a synthesized identifier
//! `ts-<first 8 chars of the peer key>` that shares the cache namespace
//! with LAN devices.

use std::collections::BTreeMap;

use async_trait::async_trait;
use netwatch_core::Device;
use serde::Deserialize;

use super::{run_command, DeviceProbe};
use crate::error::{DiscoverError, Result};

const MESH_ID_PREFIX: &str = "ts-";
const MESH_ID_KEY_CHARS: usize = 8;

/// Probe backed by `tailscale status --json`. The interface is ignored.
pub struct TailscaleProbe {
    tailscale_path: String,
}

impl TailscaleProbe {
    pub fn new() -> Self {
        Self {
            tailscale_path: "tailscale".to_string(),
        }
    }
}

impl Default for TailscaleProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceProbe for TailscaleProbe {
    async fn probe(&self, _interface: &str) -> Result<Vec<Device>> {
        let output = run_command(&self.tailscale_path, &["status", "--json"]).await?;
        parse_tailscale_status(&output)
    }
}

#[derive(Debug, Deserialize)]
struct TailscaleStatus {
    #[serde(rename = "Peer", default)]
    peers: Option<BTreeMap<String, TailscalePeer>>,
}

#[derive(Debug, Deserialize)]
struct TailscalePeer {
    #[serde(rename = "HostName", default)]
    host_name: String,
    #[serde(rename = "TailscaleIPs", default)]
    tailscale_ips: Option<Vec<String>>,
    #[serde(rename = "Online", default)]
    online: bool,
}

/// Convert `tailscale status --json` output into devices for online peers.
pub fn parse_tailscale_status(json: &str) -> Result<Vec<Device>> {
    let status: TailscaleStatus =
        serde_json::from_str(json).map_err(|e| DiscoverError::Parse(format!("tailscale: {e}")))?;

    Ok(status
        .peers
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, peer)| peer.online)
        .filter_map(|(key, peer)| {
            let ip = peer.tailscale_ips.as_ref()?.first()?.clone();
            Some(Device::new(ip, mesh_identifier(&key)).with_hostname(peer.host_name))
        })
        .collect())
}

/// Synthesize a MAC-like identifier from a peer's public key.
pub fn mesh_identifier(peer_key: &str) -> String {
    let key = peer_key.strip_prefix("nodekey:").unwrap_or(peer_key);
    let short: String = key.chars().take(MESH_ID_KEY_CHARS).collect();
    format!("{MESH_ID_PREFIX}{short}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_JSON: &str = r#"{
        "BackendState": "Running",
        "Peer": {
            "nodekey:0123456789abcdef": {
                "HostName": "laptop",
                "TailscaleIPs": ["100.101.102.103", "fd7a:115c:a1e0::1"],
                "User": 1234,
                "Online": true
            },
            "nodekey:fedcba9876543210": {
                "HostName": "phone",
                "TailscaleIPs": ["100.64.0.9"],
                "Online": false
            },
            "nodekey:aaaaaaaabbbbbbbb": {
                "HostName": "ghost",
                "TailscaleIPs": [],
                "Online": true
            }
        }
    }"#;

    #[test]
    fn test_parse_online_peers_only() {
        let devices = parse_tailscale_status(STATUS_JSON).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].ip, "100.101.102.103");
        assert_eq!(devices[0].mac, "ts-01234567");
        assert_eq!(devices[0].hostname.as_deref(), Some("laptop"));
    }

    #[test]
    fn test_no_peers() {
        let devices = parse_tailscale_status(r#"{"BackendState": "Stopped", "Peer": null}"#).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_tailscale_status("not json"),
            Err(DiscoverError::Parse(_))
        ));
    }

    #[test]
    fn test_mesh_identifier_short_key() {
        assert_eq!(mesh_identifier("abc"), "ts-abc");
        assert_eq!(mesh_identifier("0123456789"), "ts-01234567");
    }
}
