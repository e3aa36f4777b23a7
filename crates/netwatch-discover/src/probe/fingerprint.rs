//! Vendor and OS enrichment.
//!
//! The vendor comes from the static OUI table. The OS guess comes from an
//! `nmap -O` run against the device IP, read from nmap's XML output
//! (`-oX -`) with `quick-xml`. Fingerprinting usually needs root and can
//! take tens of seconds per host.

use async_trait::async_trait;
use netwatch_core::types::OS_PROBE_FAILED;
use netwatch_core::Device;
use serde::Deserialize;

use super::{run_command, Enricher};
use crate::error::{DiscoverError, Result};
use crate::vendor;

/// Root element: `<nmaprun>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "nmaprun")]
pub struct NmapRun {
    #[serde(rename = "host", default)]
    pub hosts: Vec<NmapHost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NmapHost {
    pub status: Option<HostStatus>,
    pub os: Option<OsMatches>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostStatus {
    #[serde(rename = "@state")]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsMatches {
    #[serde(rename = "osmatch", default)]
    pub matches: Vec<OsMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsMatch {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@accuracy")]
    pub accuracy: Option<String>,
    #[serde(rename = "osclass", default)]
    pub classes: Vec<OsClass>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsClass {
    #[serde(rename = "@vendor")]
    pub vendor: Option<String>,
    #[serde(rename = "@osfamily")]
    pub os_family: Option<String>,
    #[serde(rename = "@osgen")]
    pub os_gen: Option<String>,
}

impl NmapHost {
    pub fn is_up(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.state == "up")
    }

    /// Best OS match name, falling back to the first class description.
    pub fn os_guess(&self) -> Option<String> {
        let best = self.os.as_ref()?.matches.first()?;
        if !best.name.trim().is_empty() {
            return Some(best.name.trim().to_string());
        }

        let class = best.classes.first()?;
        let parts: Vec<&str> = [&class.vendor, &class.os_family, &class.os_gen]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// Parse nmap XML bytes into a structured `NmapRun`.
pub fn parse_nmap_xml(xml: &str) -> Result<NmapRun> {
    quick_xml::de::from_str(xml).map_err(|e| DiscoverError::XmlParse(format!("{e}")))
}

/// Enricher backed by the vendor table and the nmap binary.
pub struct NmapEnricher {
    nmap_path: String,
}

impl NmapEnricher {
    pub fn new(nmap_path: &str) -> Self {
        Self {
            nmap_path: nmap_path.to_string(),
        }
    }

    /// Run OS detection against a single IP.
    pub async fn fingerprint(&self, ip: &str) -> Result<Option<String>> {
        let xml = run_command(&self.nmap_path, &["-O", "-T4", "-oX", "-", ip]).await?;
        let run = parse_nmap_xml(&xml)?;
        Ok(run
            .hosts
            .iter()
            .filter(|h| h.is_up())
            .find_map(NmapHost::os_guess))
    }
}

#[async_trait]
impl Enricher for NmapEnricher {
    async fn enrich(&self, device: &mut Device) {
        device.manufacturer = Some(vendor::lookup_vendor(&device.mac).to_string());

        device.os_guess = match self.fingerprint(&device.ip).await {
            Ok(Some(guess)) => Some(guess),
            Ok(None) => Some(OS_PROBE_FAILED.to_string()),
            Err(e) => {
                tracing::debug!(ip = %device.ip, error = %e, "OS fingerprint failed");
                Some(OS_PROBE_FAILED.to_string())
            }
        };
    }
}
