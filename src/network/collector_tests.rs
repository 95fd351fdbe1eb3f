//! Tests for the merge-by-interface-index collector.

use super::{collect, merge};
use crate::network::{
    AddressFamily, FactSource, NetworkFacts, RawAdapter, RawAddress, RawDnsServers, RawRoute,
    SourceError,
};

/// A fake source returning a fixed facts document.
struct FixedSource(NetworkFacts);

impl FactSource for FixedSource {
    fn gather(&self) -> Result<NetworkFacts, SourceError> {
        Ok(self.0.clone())
    }
}

/// A source that always fails.
struct BrokenSource;

impl FactSource for BrokenSource {
    fn gather(&self) -> Result<NetworkFacts, SourceError> {
        Err(SourceError::Platform {
            message: "facility unreachable".to_string(),
        })
    }
}

fn adapter(index: u32, name: &str) -> RawAdapter {
    RawAdapter {
        index,
        name: name.to_string(),
        description: format!("{name} driver"),
        status: "Up".to_string(),
        mac_address: "AA-BB-CC-DD-EE-FF".to_string(),
        link_speed: "1 Gbps".to_string(),
        speed_bits: Some(1_000_000_000),
    }
}

fn address(index: u32, family: AddressFamily, value: &str) -> RawAddress {
    RawAddress {
        index,
        family,
        address: value.to_string(),
    }
}

fn sample_facts() -> NetworkFacts {
    NetworkFacts {
        adapters: vec![adapter(12, "Ethernet"), adapter(4, "Wi-Fi")],
        addresses: vec![
            address(12, AddressFamily::V4, "192.168.1.10"),
            address(4, AddressFamily::V4, "10.0.0.5"),
            address(12, AddressFamily::V6, "fe80::12"),
            address(4, AddressFamily::V6, "fe80::4"),
        ],
        dns: vec![
            RawDnsServers {
                index: 12,
                servers: vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()],
            },
            RawDnsServers {
                index: 4,
                servers: vec!["10.0.0.1".to_string()],
            },
        ],
        routes: vec![
            RawRoute {
                index: 12,
                next_hop: "192.168.1.1".to_string(),
            },
            RawRoute {
                index: 4,
                next_hop: "10.0.0.1".to_string(),
            },
        ],
    }
}

#[test]
fn one_record_per_adapter_in_os_order() {
    let records = merge(&sample_facts());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Ethernet");
    assert_eq!(records[1].name, "Wi-Fi");
}

#[test]
fn joins_addresses_by_interface_index_and_family() {
    let records = merge(&sample_facts());

    assert_eq!(records[0].ipv4, vec!["192.168.1.10"]);
    assert_eq!(records[0].ipv6, vec!["fe80::12"]);
    assert_eq!(records[1].ipv4, vec!["10.0.0.5"]);
    assert_eq!(records[1].ipv6, vec!["fe80::4"]);
}

#[test]
fn joins_dns_and_gateway_by_interface_index() {
    let records = merge(&sample_facts());

    assert_eq!(records[0].dns, vec!["1.1.1.1", "8.8.8.8"]);
    assert_eq!(records[0].gateway, vec!["192.168.1.1"]);
    assert_eq!(records[1].dns, vec!["10.0.0.1"]);
    assert_eq!(records[1].gateway, vec!["10.0.0.1"]);
}

#[test]
fn address_order_within_an_adapter_follows_the_os_table() {
    let facts = NetworkFacts {
        adapters: vec![adapter(1, "Ethernet")],
        addresses: vec![
            address(1, AddressFamily::V4, "172.16.0.2"),
            address(1, AddressFamily::V4, "172.16.0.1"),
        ],
        ..NetworkFacts::default()
    };

    let records = merge(&facts);

    assert_eq!(records[0].ipv4, vec!["172.16.0.2", "172.16.0.1"]);
}

#[test]
fn adapter_with_no_matching_rows_gets_empty_sequences() {
    let facts = NetworkFacts {
        adapters: vec![adapter(99, "Disconnected")],
        ..sample_facts()
    };

    let records = merge(&facts);

    assert_eq!(records.len(), 1);
    assert!(records[0].ipv4.is_empty());
    assert!(records[0].ipv6.is_empty());
    assert!(records[0].dns.is_empty());
    assert!(records[0].gateway.is_empty());
}

#[test]
fn unknown_family_rows_are_skipped() {
    let facts = NetworkFacts {
        adapters: vec![adapter(1, "Ethernet")],
        addresses: vec![address(1, AddressFamily::Unknown, "whatever")],
        ..NetworkFacts::default()
    };

    let records = merge(&facts);

    assert!(records[0].ipv4.is_empty());
    assert!(records[0].ipv6.is_empty());
}

#[test]
fn speed_comes_from_preformatted_link_speed_when_present() {
    let records = merge(&sample_facts());

    assert_eq!(records[0].speed, "1 Gbps");
}

#[test]
fn speed_falls_back_to_raw_bits_then_not_available() {
    let mut raw = adapter(1, "Ethernet");
    raw.link_speed = String::new();
    let facts = NetworkFacts {
        adapters: vec![raw.clone()],
        ..NetworkFacts::default()
    };
    assert_eq!(merge(&facts)[0].speed, "954 Mbps");

    raw.speed_bits = None;
    let facts = NetworkFacts {
        adapters: vec![raw],
        ..NetworkFacts::default()
    };
    assert_eq!(merge(&facts)[0].speed, "N/A");
}

#[test]
fn collect_returns_merged_records() {
    let source = FixedSource(sample_facts());

    let records = collect(&source);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].dns, vec!["1.1.1.1", "8.8.8.8"]);
}

#[test]
fn collect_swallows_source_errors_into_empty_result() {
    let records = collect(&BrokenSource);

    assert!(records.is_empty());
}

#[test]
fn collect_is_idempotent_without_state_change() {
    let source = FixedSource(sample_facts());

    let first = collect(&source);
    let second = collect(&source);

    assert_eq!(first, second);
}

#[test]
fn single_object_table_still_yields_one_record() {
    // Serialization edge case: the query yields a bare object where a
    // one-element array was expected.
    let json = r#"{
        "adapters": {"index": 3, "name": "Ethernet 2", "status": "Up"},
        "addresses": {"index": 3, "family": "IPv4", "address": "192.168.0.2"},
        "dns": {"index": 3, "servers": "192.168.0.1"},
        "routes": {"index": 3, "nextHop": "192.168.0.1"}
    }"#;
    let facts: NetworkFacts = serde_json::from_str(json).unwrap();

    let records = merge(&facts);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Ethernet 2");
    assert_eq!(records[0].ipv4, vec!["192.168.0.2"]);
    assert_eq!(records[0].dns, vec!["192.168.0.1"]);
    assert_eq!(records[0].gateway, vec!["192.168.0.1"]);
}
