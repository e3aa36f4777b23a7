//! netwatch-cache: Known-device store for the netwatch inventory monitor.
//!
//! Holds the last observation of every device ever seen, keyed by MAC,
//! and persists it as a single JSON document between scan cycles.

pub mod store;

use std::collections::{BTreeMap, HashSet};

use netwatch_core::Device;
use serde::{Deserialize, Serialize};

pub use store::{CacheError, DeviceCache};

/// MAC → last observed device. At most one entry per MAC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnownDevices {
    #[serde(default)]
    pub devices: BTreeMap<String, Device>,
}

impl KnownDevices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a device with this MAC has been recorded.
    pub fn is_known(&self, mac: &str) -> bool {
        self.devices.contains_key(mac)
    }

    /// Record the latest observation of a device, replacing any earlier one.
    /// Returns the previous record for that MAC, if any.
    pub fn upsert(&mut self, device: Device) -> Option<Device> {
        self.devices.insert(device.mac.clone(), device)
    }

    pub fn get(&self, mac: &str) -> Option<&Device> {
        self.devices.get(mac)
    }

    /// The set of known MACs at this moment.
    pub fn macs(&self) -> HashSet<String> {
        self.devices.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_overwrites_by_mac() {
        let mut known = KnownDevices::new();
        let first = Device::new("192.168.1.10", "AA:BB:CC:00:00:01");
        let moved = Device::new("192.168.1.42", "AA:BB:CC:00:00:01").with_hostname("laptop");

        assert!(known.upsert(first.clone()).is_none());
        assert_eq!(known.upsert(moved.clone()), Some(first));

        assert_eq!(known.len(), 1);
        assert_eq!(known.get("AA:BB:CC:00:00:01"), Some(&moved));
    }

    #[test]
    fn is_known_is_exact_membership() {
        let mut known = KnownDevices::new();
        known.upsert(Device::new("192.168.1.10", "AA:BB:CC:00:00:01"));

        assert!(known.is_known("AA:BB:CC:00:00:01"));
        assert!(!known.is_known("AA:BB:CC:00:00:02"));
    }

    #[test]
    fn macs_snapshot_is_detached() {
        let mut known = KnownDevices::new();
        known.upsert(Device::new("192.168.1.10", "AA:BB:CC:00:00:01"));
        let snapshot = known.macs();

        known.upsert(Device::new("192.168.1.11", "AA:BB:CC:00:00:02"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(known.len(), 2);
    }

    #[test]
    fn missing_devices_field_defaults_empty() {
        let known: KnownDevices = serde_json::from_str("{}").unwrap();
        assert!(known.is_empty());
    }
}
