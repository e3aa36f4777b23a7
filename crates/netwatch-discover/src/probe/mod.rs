//! Device discovery capabilities.
//!
//! Every external mechanism (ARP table, Tailscale, nmap, SSID tools) sits
//! behind one of the traits below so the reconciliation engine never sees
//! how devices are found. Implementations shell out via
//! `tokio::process::Command` and scrape or deserialize the output.

pub mod arp;
pub mod fingerprint;
pub mod ssid;
pub mod tailscale;

use async_trait::async_trait;
use netwatch_core::Device;
use tokio::process::Command;

use crate::error::{DiscoverError, Result};

pub use arp::ArpProbe;
pub use fingerprint::NmapEnricher;
pub use ssid::SsidLookup;
pub use tailscale::TailscaleProbe;

/// Enumerates devices currently visible on a network segment.
#[async_trait]
pub trait DeviceProbe: Send + Sync {
    async fn probe(&self, interface: &str) -> Result<Vec<Device>>;
}

/// Fills in vendor and OS guess for a device.
///
/// Best effort: a missing answer is recorded as an explicit "unknown"
/// marker, never reported as an error.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, device: &mut Device);
}

/// Resolves the name of the network the interface is attached to.
#[async_trait]
pub trait NetworkNameSource: Send + Sync {
    /// `None` when the name cannot be determined on this platform.
    async fn network_name(&self, interface: &str) -> Option<String>;
}

/// Run a command to completion and return its stdout as text.
pub(crate) async fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| DiscoverError::CommandNotFound {
            command: format!("{program}: {e}"),
        })?;

    if !output.status.success() {
        return Err(DiscoverError::CommandFailed {
            command: format!("{program} {}", args.join(" ")),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
