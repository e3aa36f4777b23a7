//! ARP table probe.
//!
//! Reads `arp -a`, keeps entries bound to the configured interface and
//! extracts IP, MAC and hostname:
//! ```text
//! router.lan (192.168.1.1) at e8:6d:aa:0:1:2 on en0 ifscope [ethernet]
//! ? (192.168.1.20) at 00:17:88:aa:bb:cc [ether] on wlan0
//! ```

use async_trait::async_trait;
use netwatch_core::types::normalize_mac;
use netwatch_core::Device;

use super::{run_command, DeviceProbe};
use crate::error::Result;

/// Probe backed by the system `arp` command.
pub struct ArpProbe {
    arp_path: String,
}

impl ArpProbe {
    pub fn new() -> Self {
        Self {
            arp_path: "arp".to_string(),
        }
    }
}

impl Default for ArpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceProbe for ArpProbe {
    async fn probe(&self, interface: &str) -> Result<Vec<Device>> {
        let output = run_command(&self.arp_path, &["-a"]).await?;
        let devices = parse_arp_output(&output, interface);

        tracing::debug!(
            interface = %interface,
            devices = devices.len(),
            "ARP table parsed"
        );

        Ok(devices)
    }
}

/// Extract devices on `interface` from `arp -a` output.
pub fn parse_arp_output(output: &str, interface: &str) -> Vec<Device> {
    output
        .lines()
        .filter(|line| mentions_interface(line, interface))
        .filter_map(parse_arp_line)
        .collect()
}

fn mentions_interface(line: &str, interface: &str) -> bool {
    line.split_whitespace().any(|token| token == interface)
}

fn parse_arp_line(line: &str) -> Option<Device> {
    let open = line.find('(')?;
    let close = open + line[open..].find(')')?;
    let ip = line[open + 1..close].trim();
    if ip.parse::<std::net::IpAddr>().is_err() {
        return None;
    }

    let after_at = line[close..].split_once(" at ")?.1;
    let raw_mac = after_at.split_whitespace().next()?;
    let mac = normalize_mac(raw_mac).ok()?;
    if mac == "00:00:00:00:00:00" || mac == "FF:FF:FF:FF:FF:FF" {
        return None;
    }

    let device = Device::new(ip, mac);
    match line.split_whitespace().next() {
        Some(name) if name != "?" && !name.starts_with('(') => Some(device.with_hostname(name)),
        _ => Some(device),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MACOS_ARP: &str = "\
router.lan (192.168.1.1) at e8:6d:aa:0:1:2 on en0 ifscope [ethernet]
? (192.168.1.20) at 0:17:88:aa:bb:cc on en0 ifscope [ethernet]
? (192.168.1.30) at (incomplete) on en0 ifscope [ethernet]
? (192.168.1.255) at ff:ff:ff:ff:ff:ff on en0 ifscope [ethernet]
? (10.8.0.4) at 3c:5a:b4:11:22:33 on utun3 ifscope [ethernet]
";

    const LINUX_ARP: &str = "\
? (192.168.0.1) at bc:92:6b:01:02:03 [ether] on wlan0
nas.home (192.168.0.50) at 00:1c:b3:0a:0b:0c [ether] on wlan0
? (172.17.0.2) at 02:42:ac:11:00:02 [ether] on docker0
";

    #[test]
    fn test_parse_macos_output() {
        let devices = parse_arp_output(MACOS_ARP, "en0");
        assert_eq!(devices.len(), 2);

        assert_eq!(devices[0].ip, "192.168.1.1");
        assert_eq!(devices[0].mac, "E8:6D:AA:00:01:02");
        assert_eq!(devices[0].hostname.as_deref(), Some("router.lan"));

        assert_eq!(devices[1].ip, "192.168.1.20");
        assert_eq!(devices[1].mac, "00:17:88:AA:BB:CC");
        assert!(devices[1].hostname.is_none());
    }

    #[test]
    fn test_parse_linux_output() {
        let devices = parse_arp_output(LINUX_ARP, "wlan0");
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1].hostname.as_deref(), Some("nas.home"));
        assert_eq!(devices[1].mac, "00:1C:B3:0A:0B:0C");
    }

    #[test]
    fn test_interface_match_is_exact_token() {
        assert!(parse_arp_output(MACOS_ARP, "en").is_empty());
        assert_eq!(parse_arp_output(MACOS_ARP, "utun3").len(), 1);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_arp_output("", "en0").is_empty());
    }
}
