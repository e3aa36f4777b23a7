//! Static MAC prefix → vendor table.
//!
//! Read-only and compiled in; lookups need no synchronization.

use netwatch_core::types::{oui_prefix, UNKNOWN_VENDOR};

/// Known OUI prefixes in `XX-XX-XX` form.
const VENDORS: &[(&str, &str)] = &[
    ("00-0C-29", "VMware, Inc."),
    ("00-0F-4B", "Nintendo Co., Ltd."),
    ("00-13-02", "Toshiba"),
    ("00-15-5D", "Microsoft Hyper-V"),
    ("00-16-3E", "Xensource, Inc."),
    ("00-17-88", "Netgear"),
    ("00-18-4D", "D-Link Corporation"),
    ("00-19-E0", "Hon Hai Precision (Foxconn)"),
    ("00-1A-11", "Samsung Electronics"),
    ("00-1A-2B", "Cisco Systems"),
    ("00-1B-63", "Apple Inc."),
    ("00-1B-77", "Hewlett Packard"),
    ("00-1C-23", "Cisco Systems"),
    ("00-1C-B3", "Dell Inc."),
    ("00-1D-0F", "Sony Corporation"),
    ("00-1D-7E", "Hewlett Packard"),
    ("00-1E-65", "Sony Mobile"),
    ("00-1E-8C", "Apple Inc."),
    ("00-1F-16", "Dell Inc."),
    ("00-1F-3B", "LG Electronics"),
    ("00-21-5C", "ASUSTek Computer"),
    ("00-21-6A", "Microsoft"),
    ("00-22-41", "Nokia"),
    ("00-22-48", "Nokia"),
    ("00-23-54", "Huawei Technologies"),
    ("00-23-69", "Huawei Technologies"),
    ("00-24-21", "TP-LINK Technologies"),
    ("00-24-E8", "ASUSTek Computer"),
    ("00-25-86", "Motorola Mobility"),
    ("00-25-9C", "TP-LINK Technologies"),
    ("00-26-5A", "Lenovo Mobile"),
    ("00-26-BB", "Motorola Mobility"),
    ("00-27-0E", "Lenovo Mobile"),
    ("00-27-15", "Amazon Technologies"),
    ("00-28-38", "Google Inc."),
    ("00-28-F8", "Amazon Technologies"),
    ("00-30-65", "Google Inc."),
    ("00-50-43", "Cisco Systems"),
    ("00-50-56", "VMware, Inc."),
    ("00-90-27", "ASRock Incorporation"),
    ("00-90-A9", "ASRock Incorporation"),
    ("3C-5A-B4", "Samsung Electronics"),
    ("40-B0-FA", "Xiaomi"),
    ("BC-92-6B", "Intel Corp."),
    ("E8-6D-AA", "Raspberry Pi Foundation"),
    ("F0-9F-C2", "Apple Inc."),
];

/// Vendor name for a MAC, or [`UNKNOWN_VENDOR`] when the prefix is unknown
/// or the identifier is not a MAC at all (mesh peers).
pub fn lookup_vendor(mac: &str) -> &'static str {
    let Some(prefix) = oui_prefix(mac) else {
        return UNKNOWN_VENDOR;
    };

    VENDORS
        .binary_search_by(|(key, _)| key.cmp(&prefix.as_str()))
        .map(|idx| VENDORS[idx].1)
        .unwrap_or(UNKNOWN_VENDOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_for_binary_search() {
        assert!(VENDORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_known_prefix() {
        assert_eq!(lookup_vendor("E8:6D:AA:12:34:56"), "Raspberry Pi Foundation");
        assert_eq!(lookup_vendor("f0:9f:c2:00:00:01"), "Apple Inc.");
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(lookup_vendor("02:42:AC:11:00:02"), UNKNOWN_VENDOR);
    }

    #[test]
    fn test_mesh_identifier_is_unknown() {
        assert_eq!(lookup_vendor("ts-0123abcd"), UNKNOWN_VENDOR);
        assert_eq!(lookup_vendor(""), UNKNOWN_VENDOR);
    }
}
