//! Raw platform facts: the four OS tables joined by interface index.
//!
//! These types mirror what the operating system reports before any merging.
//! Both the PowerShell source and the native Windows source produce the same
//! [`NetworkFacts`] value, so the collector's join logic is independent of
//! which mechanism supplied the data.

use serde::{Deserialize, Deserializer, Serialize};

/// Address family tag attached to each raw IP address row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// IPv4 address.
    #[serde(rename = "IPv4")]
    V4,
    /// IPv6 address.
    #[serde(rename = "IPv6")]
    V6,
    /// Unrecognized family reported by the OS; rows with this tag are
    /// skipped by the collector.
    #[default]
    #[serde(other)]
    Unknown,
}

/// One row of the OS adapter table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAdapter {
    /// Interface index: the join key shared by all four tables.
    pub index: u32,
    /// OS-assigned interface name.
    pub name: String,
    /// Vendor/driver description.
    pub description: String,
    /// Operational state string, as reported.
    pub status: String,
    /// Hardware address in textual form.
    pub mac_address: String,
    /// Pre-formatted link speed (e.g., "1 Gbps"); may be blank.
    pub link_speed: String,
    /// Raw link speed in bits/sec, when the OS reports one.
    pub speed_bits: Option<u64>,
}

/// One row of the OS IP address table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAddress {
    /// Owning interface index.
    pub index: u32,
    /// Address family of this row.
    pub family: AddressFamily,
    /// The address in textual form.
    pub address: String,
}

/// One row of the OS DNS configuration table: all servers for one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDnsServers {
    /// Owning interface index.
    pub index: u32,
    /// Configured DNS server addresses, OS order.
    #[serde(deserialize_with = "one_or_many")]
    pub servers: Vec<String>,
}

/// One row of the OS default-route table (`0.0.0.0/0`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRoute {
    /// Owning interface index.
    pub index: u32,
    /// Next-hop (gateway) address for the default route.
    pub next_hop: String,
}

/// The four independent OS tables, each addressable by interface index.
///
/// # Single-Object Tolerance
///
/// When exactly one row exists, some serializers emit a bare object instead
/// of a one-element array. Every table here accepts both shapes and
/// normalizes to a sequence; this is a required compatibility behavior of
/// the external query mechanism, not a bug to eliminate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkFacts {
    /// Adapter table: one row per interface, OS order.
    #[serde(deserialize_with = "one_or_many")]
    pub adapters: Vec<RawAdapter>,
    /// Assigned IP addresses, tagged with owning index and family.
    #[serde(deserialize_with = "one_or_many")]
    pub addresses: Vec<RawAddress>,
    /// DNS server configuration per interface.
    #[serde(deserialize_with = "one_or_many")]
    pub dns: Vec<RawDnsServers>,
    /// Default-route next-hops per interface.
    #[serde(deserialize_with = "one_or_many")]
    pub routes: Vec<RawRoute>,
}

/// Deserializes a sequence that may arrive as an array, a bare single
/// element, or `null`/missing (normalized to empty).
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(values)) => values,
        Some(OneOrMany::One(value)) => vec![value],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_parse_from_full_document() {
        let json = r#"{
            "adapters": [
                {"index": 12, "name": "Ethernet", "description": "Intel(R) I219-V",
                 "status": "Up", "macAddress": "00-11-22-33-44-55",
                 "linkSpeed": "1 Gbps", "speedBits": 1000000000}
            ],
            "addresses": [
                {"index": 12, "family": "IPv4", "address": "192.168.1.10"},
                {"index": 12, "family": "IPv6", "address": "fe80::1"}
            ],
            "dns": [{"index": 12, "servers": ["1.1.1.1", "8.8.8.8"]}],
            "routes": [{"index": 12, "nextHop": "192.168.1.1"}]
        }"#;

        let facts: NetworkFacts = serde_json::from_str(json).unwrap();

        assert_eq!(facts.adapters.len(), 1);
        assert_eq!(facts.adapters[0].index, 12);
        assert_eq!(facts.adapters[0].link_speed, "1 Gbps");
        assert_eq!(facts.addresses.len(), 2);
        assert_eq!(facts.addresses[0].family, AddressFamily::V4);
        assert_eq!(facts.dns[0].servers, vec!["1.1.1.1", "8.8.8.8"]);
        assert_eq!(facts.routes[0].next_hop, "192.168.1.1");
    }

    #[test]
    fn single_object_table_normalizes_to_one_element() {
        let json = r#"{
            "adapters": {"index": 4, "name": "Wi-Fi", "status": "Up"},
            "addresses": {"index": 4, "family": "IPv4", "address": "10.0.0.5"},
            "dns": {"index": 4, "servers": "10.0.0.1"},
            "routes": {"index": 4, "nextHop": "10.0.0.1"}
        }"#;

        let facts: NetworkFacts = serde_json::from_str(json).unwrap();

        assert_eq!(facts.adapters.len(), 1);
        assert_eq!(facts.adapters[0].name, "Wi-Fi");
        assert_eq!(facts.addresses.len(), 1);
        assert_eq!(facts.dns.len(), 1);
        assert_eq!(facts.dns[0].servers, vec!["10.0.0.1"]);
        assert_eq!(facts.routes.len(), 1);
    }

    #[test]
    fn null_and_missing_tables_are_empty() {
        let facts: NetworkFacts =
            serde_json::from_str(r#"{"adapters": null, "addresses": null}"#).unwrap();

        assert!(facts.adapters.is_empty());
        assert!(facts.addresses.is_empty());
        assert!(facts.dns.is_empty());
        assert!(facts.routes.is_empty());
    }

    #[test]
    fn unknown_address_family_is_tagged_unknown() {
        let row: RawAddress =
            serde_json::from_str(r#"{"index": 1, "family": "AppleTalk", "address": "x"}"#).unwrap();

        assert_eq!(row.family, AddressFamily::Unknown);
    }

    #[test]
    fn adapter_row_defaults_missing_fields() {
        let row: RawAdapter = serde_json::from_str(r#"{"index": 7, "name": "vEthernet"}"#).unwrap();

        assert_eq!(row.index, 7);
        assert_eq!(row.link_speed, "");
        assert_eq!(row.speed_bits, None);
        assert_eq!(row.status, "");
    }

    #[test]
    fn speed_bits_null_is_none() {
        let row: RawAdapter =
            serde_json::from_str(r#"{"index": 1, "speedBits": null}"#).unwrap();

        assert_eq!(row.speed_bits, None);
    }
}
