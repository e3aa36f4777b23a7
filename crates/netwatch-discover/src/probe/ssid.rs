//! Wi-Fi network name lookup.

use async_trait::async_trait;

use super::{run_command, NetworkNameSource};

#[cfg(target_os = "macos")]
const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

/// SSID lookup via `iwgetid` on Linux and `airport -I` on macOS.
#[derive(Debug, Default)]
pub struct SsidLookup;

impl SsidLookup {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NetworkNameSource for SsidLookup {
    #[cfg(target_os = "linux")]
    async fn network_name(&self, interface: &str) -> Option<String> {
        match run_command("iwgetid", &[interface, "-r"]).await {
            Ok(output) => parse_iwgetid_output(&output),
            Err(e) => {
                tracing::debug!(interface = %interface, error = %e, "SSID lookup failed");
                None
            }
        }
    }

    #[cfg(target_os = "macos")]
    async fn network_name(&self, interface: &str) -> Option<String> {
        match run_command(AIRPORT_PATH, &["-I"]).await {
            Ok(output) => parse_airport_output(&output),
            Err(e) => {
                tracing::debug!(interface = %interface, error = %e, "SSID lookup failed");
                None
            }
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    async fn network_name(&self, _interface: &str) -> Option<String> {
        None
    }
}

/// `iwgetid -r` prints the bare SSID.
pub fn parse_iwgetid_output(output: &str) -> Option<String> {
    clean_ssid(output)
}

/// `airport -I` prints `key: value` lines; the SSID is on ` SSID:`.
pub fn parse_airport_output(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("SSID:"))
        .and_then(clean_ssid)
}

fn clean_ssid(raw: &str) -> Option<String> {
    let ssid = raw.trim();
    (!ssid.is_empty() && ssid != "Unknown").then(|| ssid.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iwgetid() {
        assert_eq!(parse_iwgetid_output("HomeNet\n").as_deref(), Some("HomeNet"));
        assert_eq!(parse_iwgetid_output("\n"), None);
    }

    #[test]
    fn test_parse_airport() {
        let output = "     agrCtlRSSI: -52\n          BSSID: aa:bb:cc:dd:ee:ff\n           SSID: Coffee Shop\n            MCS: 9\n";
        assert_eq!(parse_airport_output(output).as_deref(), Some("Coffee Shop"));
    }

    #[test]
    fn test_parse_airport_ignores_bssid() {
        let output = "          BSSID: aa:bb:cc:dd:ee:ff\n";
        assert_eq!(parse_airport_output(output), None);
    }

    #[test]
    fn test_unknown_is_treated_as_missing() {
        assert_eq!(parse_iwgetid_output("Unknown"), None);
    }
}
