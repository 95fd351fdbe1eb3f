//! Core network types for adapter representation.

use serde::{Deserialize, Serialize};

/// Bits per megabit as Windows reports link rates (1 MB = 1,048,576 bits
/// in `Get-NetAdapter` speed math, so 1 Gbps rounds to 954 Mbps).
const BITS_PER_MEGABIT: f64 = 1_048_576.0;

/// Literal fallback when no rate information is available or resolvable.
const SPEED_UNAVAILABLE: &str = "N/A";

/// A point-in-time snapshot of a single network adapter, merged from the
/// OS's adapter, address, DNS, and route tables.
///
/// # Shape Invariant
///
/// Every field is present in every record: strings default to `""` and
/// sequences to `[]` when the underlying OS query yields partial data.
/// Serialized field names are camelCase to match the caller-facing JSON
/// contract (`interfaceDescription`, `macAddress`, ...).
///
/// # Lifecycle
///
/// Records carry no persisted identity and are never cached; re-invoking
/// the collector is the only refresh mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterRecord {
    /// OS-assigned interface name (e.g., "Ethernet", "Wi-Fi").
    /// Unique among currently-present adapters, but not stable across reboots.
    pub name: String,
    /// Vendor/driver description.
    pub interface_description: String,
    /// OS-reported operational state, passed through unmodified
    /// (e.g., "Up", "Disconnected", "Disabled").
    pub status: String,
    /// Hardware address in the OS's native textual format.
    pub mac_address: String,
    /// Human-readable link rate, or `"N/A"` when unresolvable.
    pub speed: String,
    /// IPv4 addresses bound to this adapter, OS order.
    pub ipv4: Vec<String>,
    /// IPv6 addresses bound to this adapter, OS order.
    pub ipv6: Vec<String>,
    /// Default-route next-hop addresses for this adapter.
    pub gateway: Vec<String>,
    /// DNS server addresses configured for this adapter.
    pub dns: Vec<String>,
}

/// Resolves the human-readable speed for an adapter.
///
/// Prefers the pre-formatted link-speed string when non-blank. Otherwise a
/// positive raw bits/sec value is formatted as rounded megabits with a
/// `" Mbps"` suffix; with neither available the literal `"N/A"` is returned.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn resolve_speed(link_speed: &str, speed_bits: Option<u64>) -> String {
    let preformatted = link_speed.trim();
    if !preformatted.is_empty() {
        return preformatted.to_string();
    }

    match speed_bits {
        Some(bits) if bits > 0 => {
            let megabits = (bits as f64 / BITS_PER_MEGABIT).round() as u64;
            format!("{megabits} Mbps")
        }
        _ => SPEED_UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod record {
        use super::*;

        #[test]
        fn default_record_has_complete_shape() {
            let record = AdapterRecord::default();

            assert_eq!(record.name, "");
            assert_eq!(record.interface_description, "");
            assert_eq!(record.status, "");
            assert_eq!(record.mac_address, "");
            assert_eq!(record.speed, "");
            assert!(record.ipv4.is_empty());
            assert!(record.ipv6.is_empty());
            assert!(record.gateway.is_empty());
            assert!(record.dns.is_empty());
        }

        #[test]
        fn serializes_every_field_even_when_empty() {
            let json = serde_json::to_value(AdapterRecord::default()).unwrap();
            let object = json.as_object().unwrap();

            for field in [
                "name",
                "interfaceDescription",
                "status",
                "macAddress",
                "speed",
                "ipv4",
                "ipv6",
                "gateway",
                "dns",
            ] {
                assert!(object.contains_key(field), "missing field: {field}");
            }
        }

        #[test]
        fn deserializes_with_missing_fields_as_defaults() {
            let record: AdapterRecord = serde_json::from_str(r#"{"name": "Ethernet"}"#).unwrap();

            assert_eq!(record.name, "Ethernet");
            assert!(record.ipv4.is_empty());
            assert!(record.dns.is_empty());
            assert_eq!(record.speed, "");
        }

        #[test]
        fn camel_case_field_names_on_the_wire() {
            let record = AdapterRecord {
                interface_description: "Intel(R) Ethernet Connection".to_string(),
                mac_address: "00-11-22-33-44-55".to_string(),
                ..AdapterRecord::default()
            };
            let json = serde_json::to_value(&record).unwrap();

            assert_eq!(json["interfaceDescription"], "Intel(R) Ethernet Connection");
            assert_eq!(json["macAddress"], "00-11-22-33-44-55");
        }
    }

    mod speed {
        use super::*;

        #[test]
        fn prefers_preformatted_link_speed() {
            assert_eq!(resolve_speed("1 Gbps", Some(1_000_000_000)), "1 Gbps");
        }

        #[test]
        fn trims_preformatted_link_speed() {
            assert_eq!(resolve_speed("  100 Mbps  ", None), "100 Mbps");
        }

        #[test]
        fn one_gigabit_raw_rounds_to_954_mbps() {
            assert_eq!(resolve_speed("", Some(1_000_000_000)), "954 Mbps");
        }

        #[test]
        fn hundred_megabit_raw_rounds_to_95_mbps() {
            assert_eq!(resolve_speed("", Some(100_000_000)), "95 Mbps");
        }

        #[test]
        fn zero_raw_speed_is_not_available() {
            assert_eq!(resolve_speed("", Some(0)), "N/A");
        }

        #[test]
        fn absent_raw_speed_is_not_available() {
            assert_eq!(resolve_speed("", None), "N/A");
        }

        #[test]
        fn blank_link_speed_with_no_raw_value_is_not_available() {
            assert_eq!(resolve_speed("   ", None), "N/A");
        }
    }
}
