//! Core domain types for the device inventory.
//!
//! A `Device` is a plain value record keyed by its MAC address. The same
//! shape is used for probe results, enrichment, notification formatting and
//! the persisted known-device cache.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rendered in place of any missing device attribute.
pub const UNKNOWN: &str = "Unknown";

/// Rendered when the current network name cannot be resolved.
pub const NETWORK_PLACEHOLDER: &str = "N/A";

/// Vendor recorded when the MAC prefix is not in the vendor table.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// OS guess recorded when the fingerprinting probe yields nothing.
pub const OS_PROBE_FAILED: &str = "Unknown (probe failed)";

// ── Device ────────────────────────────────────────────────────────

/// A network endpoint observed during a scan.
///
/// `mac` is the identity: uppercase, colon-delimited for LAN devices, or a
/// synthesized `ts-` token for mesh peers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub ip: String,
    pub mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_guess: Option<String>,
}

impl Device {
    pub fn new(ip: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            mac: mac.into(),
            hostname: None,
            manufacturer: None,
            os_guess: None,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        let hostname = hostname.into();
        self.hostname = (!hostname.is_empty()).then_some(hostname);
        self
    }

    /// Hostname for display, falling back to [`UNKNOWN`].
    pub fn hostname_or_unknown(&self) -> &str {
        display_or_unknown(self.hostname.as_deref())
    }

    /// Vendor for display, falling back to [`UNKNOWN`].
    pub fn manufacturer_or_unknown(&self) -> &str {
        display_or_unknown(self.manufacturer.as_deref())
    }

    /// OS guess for display, falling back to [`UNKNOWN`].
    pub fn os_guess_or_unknown(&self) -> &str {
        display_or_unknown(self.os_guess.as_deref())
    }
}

fn display_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN,
    }
}

// ── Source ────────────────────────────────────────────────────────

/// Which discovery mechanism observed a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceSource {
    /// The local LAN segment of the configured interface.
    Lan,
    /// The Tailscale overlay mesh.
    Mesh,
}

impl DeviceSource {
    /// Human-readable label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lan => "Wi-Fi",
            Self::Mesh => "Tailscale",
        }
    }
}

impl std::fmt::Display for DeviceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── MAC handling ──────────────────────────────────────────────────

/// Normalize a MAC address to uppercase `XX:XX:XX:XX:XX:XX`.
///
/// Accepts `:` or `-` separators and single-digit octets as printed by BSD
/// `arp` (`a4:5e:60:e8:1:2`).
pub fn normalize_mac(mac: &str) -> Result<String, CoreError> {
    let octets: Vec<&str> = mac.trim().split([':', '-']).collect();

    let valid = octets.len() == 6
        && octets
            .iter()
            .all(|o| (1..=2).contains(&o.len()) && o.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(CoreError::InvalidMac(mac.to_string()));
    }

    Ok(octets
        .iter()
        .map(|o| format!("{:0>2}", o.to_ascii_uppercase()))
        .collect::<Vec<_>>()
        .join(":"))
}

/// Vendor table key (`XX-XX-XX`) for a MAC, or `None` if it is not a MAC.
pub fn oui_prefix(mac: &str) -> Option<String> {
    let normalized = normalize_mac(mac).ok()?;
    Some(normalized[..8].replace(':', "-"))
}
