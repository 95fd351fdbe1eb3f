//! Merge-by-interface-index: raw OS tables into normalized adapter records.

use super::adapter::resolve_speed;
use super::{AdapterRecord, AddressFamily, FactSource, NetworkFacts};

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;

/// Collects a snapshot of every network adapter on the host.
///
/// Never fails the caller: any gathering error is logged at warn level and
/// collapsed into an empty vector. A failed enumeration and "no adapters"
/// are deliberately indistinguishable here, since neither is actionable by
/// the caller beyond showing nothing.
pub fn collect(source: &dyn FactSource) -> Vec<AdapterRecord> {
    match source.gather() {
        Ok(facts) => merge(&facts),
        Err(error) => {
            tracing::warn!("Adapter enumeration failed: {error}");
            Vec::new()
        }
    }
}

/// Joins the address, DNS, and route tables onto the adapter table by
/// interface index, preserving the OS-reported adapter order.
///
/// Rows in the secondary tables keep the order the OS returned them in;
/// DNS server lists are flattened across matching rows.
#[must_use]
pub fn merge(facts: &NetworkFacts) -> Vec<AdapterRecord> {
    facts
        .adapters
        .iter()
        .map(|adapter| {
            let index = adapter.index;

            let mut ipv4 = Vec::new();
            let mut ipv6 = Vec::new();
            for row in facts.addresses.iter().filter(|row| row.index == index) {
                match row.family {
                    AddressFamily::V4 => ipv4.push(row.address.clone()),
                    AddressFamily::V6 => ipv6.push(row.address.clone()),
                    AddressFamily::Unknown => {}
                }
            }

            let dns = facts
                .dns
                .iter()
                .filter(|row| row.index == index)
                .flat_map(|row| row.servers.iter().cloned())
                .collect();

            let gateway = facts
                .routes
                .iter()
                .filter(|row| row.index == index)
                .map(|row| row.next_hop.clone())
                .collect();

            AdapterRecord {
                name: adapter.name.clone(),
                interface_description: adapter.description.clone(),
                status: adapter.status.clone(),
                mac_address: adapter.mac_address.clone(),
                speed: resolve_speed(&adapter.link_speed, adapter.speed_bits),
                ipv4,
                ipv6,
                gateway,
                dns,
            }
        })
        .collect()
}
