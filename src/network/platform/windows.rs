//! Native Windows fact source using `GetAdaptersAddresses`.
//!
//! Produces the same [`NetworkFacts`] tables as the PowerShell source, so
//! the collector's merge path is identical regardless of mechanism. One API
//! call supplies all four tables: each adapter entry carries linked lists of
//! unicast addresses, DNS servers, and default gateways.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_INCLUDE_GATEWAYS, GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_MULTICAST,
    GetAdaptersAddresses, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::{
    IF_OPER_STATUS, IfOperStatusDormant, IfOperStatusDown, IfOperStatusLowerLayerDown,
    IfOperStatusNotPresent, IfOperStatusTesting, IfOperStatusUp,
};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR, SOCKADDR_IN, SOCKADDR_IN6,
};

use crate::network::{
    AddressFamily, FactSource, NetworkFacts, RawAdapter, RawAddress, RawDnsServers, RawRoute,
    SourceError,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API reports the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Native [`FactSource`] backed by `GetAdaptersAddresses`.
///
/// # Example
///
/// ```no_run
/// use netdeck::network::{FactSource, platform::WindowsApiSource};
///
/// let source = WindowsApiSource::new();
/// let facts = source.gather().expect("Failed to gather facts");
///
/// for adapter in &facts.adapters {
///     println!("{}: {}", adapter.index, adapter.name);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsApiSource {
    // Currently no configuration needed, but struct allows future extension
    _private: (),
}

impl WindowsApiSource {
    /// Creates a new native Windows fact source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl FactSource for WindowsApiSource {
    fn gather(&self) -> Result<NetworkFacts, SourceError> {
        gather_facts()
    }
}

/// Walks the adapter linked list into the four facts tables.
fn gather_facts() -> Result<NetworkFacts, SourceError> {
    let buffer = get_adapter_addresses()?;

    let mut facts = NetworkFacts::default();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for
    // IP_ADAPTER_ADDRESSES_LH; alignment of the returned structures is
    // guaranteed by the API.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The linked list is valid as long as `buffer` is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };
        append_adapter(adapter, &mut facts);
        current = adapter.Next;
    }

    Ok(facts)
}

/// Calls `GetAdaptersAddresses` and returns the raw buffer of adapter data.
///
/// Two-call pattern: first with an estimated buffer, retried with the exact
/// size when the estimate is too small.
fn get_adapter_addresses() -> Result<Vec<u8>, SourceError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_INCLUDE_GATEWAYS;
    let family = u32::from(AF_UNSPEC.0); // Both IPv4 and IPv6

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: We provide a valid buffer and size. The function writes adapter
    // information to the buffer and updates `size` with the required length.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Handles the result of `GetAdaptersAddresses`, retrying once with a larger
/// buffer on overflow.
///
/// # Coverage Note
///
/// Excluded from coverage: the overflow path needs more than 16KB of adapter
/// data, and the error paths need real API failures.
#[cfg(not(tarpaulin_include))]
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<u8>,
    size: &mut u32,
    flags: windows::Win32::NetworkManagement::IpHelper::GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), SourceError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(*size as usize, 0);

        // SAFETY: Same as the first call, with a correctly sized buffer.
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        };

        if result != NO_ERROR.0 {
            return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
        }
    } else if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(())
}

/// Appends one adapter entry and its address/DNS/gateway sublists to the
/// facts tables. Entries whose friendly name cannot be read are skipped.
fn append_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH, facts: &mut NetworkFacts) {
    // SAFETY: FriendlyName and Description are NUL-terminated wide strings
    // within the API buffer.
    let Ok(name) = (unsafe { adapter.FriendlyName.to_string() }) else {
        return;
    };
    let description = unsafe { adapter.Description.to_string() }.unwrap_or_default();

    let index = interface_index(adapter);

    facts.adapters.push(RawAdapter {
        index,
        name,
        description,
        status: oper_status_name(adapter.OperStatus).to_string(),
        mac_address: format_mac(adapter),
        // The native API has no pre-formatted rate string; the collector
        // formats the raw bits/sec value instead.
        link_speed: String::new(),
        speed_bits: link_speed_bits(adapter.TransmitLinkSpeed),
    });

    collect_unicast(adapter, index, &mut facts.addresses);
    collect_dns(adapter, index, &mut facts.dns);
    collect_gateways(adapter, index, &mut facts.routes);
}

/// Returns the interface index shared with the other OS tables.
///
/// IPv6-only interfaces report an IPv4 index of zero; fall back to the IPv6
/// index so the join key stays meaningful.
fn interface_index(adapter: &IP_ADAPTER_ADDRESSES_LH) -> u32 {
    // SAFETY: The union's struct variant is always initialized by the API.
    let index = unsafe { adapter.Anonymous1.Anonymous.IfIndex };
    if index != 0 { index } else { adapter.Ipv6IfIndex }
}

/// Maps the operational status to its textual name, passed through to
/// callers unmodified.
fn oper_status_name(status: IF_OPER_STATUS) -> &'static str {
    match status {
        s if s == IfOperStatusUp => "Up",
        s if s == IfOperStatusDown => "Down",
        s if s == IfOperStatusTesting => "Testing",
        s if s == IfOperStatusDormant => "Dormant",
        s if s == IfOperStatusNotPresent => "Not Present",
        s if s == IfOperStatusLowerLayerDown => "Lower Layer Down",
        _ => "Unknown",
    }
}

/// Formats the physical address in Windows textual form (`AA-BB-CC-DD-EE-FF`),
/// or an empty string for adapters without one (loopback, tunnels).
fn format_mac(adapter: &IP_ADAPTER_ADDRESSES_LH) -> String {
    let length = adapter.PhysicalAddressLength as usize;
    let bytes = adapter
        .PhysicalAddress
        .get(..length.min(adapter.PhysicalAddress.len()))
        .unwrap_or_default();

    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalizes the raw transmit rate. The API reports `u64::MAX` when the
/// rate is unknown.
const fn link_speed_bits(raw: u64) -> Option<u64> {
    if raw == u64::MAX { None } else { Some(raw) }
}

/// Walks the unicast address list into address rows.
fn collect_unicast(adapter: &IP_ADAPTER_ADDRESSES_LH, index: u32, rows: &mut Vec<RawAddress>) {
    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each list node is valid as long as the parent buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        // SAFETY: Address holds a valid SOCKET_ADDRESS within the buffer.
        if let Some(sockaddr) = unsafe { entry.Address.lpSockaddr.as_ref() } {
            if let Some((family, address)) = parse_sockaddr(sockaddr) {
                rows.push(RawAddress {
                    index,
                    family,
                    address: address.to_string(),
                });
            }
        }

        unicast = entry.Next;
    }
}

/// Walks the DNS server list into one servers row for this adapter.
fn collect_dns(adapter: &IP_ADAPTER_ADDRESSES_LH, index: u32, rows: &mut Vec<RawDnsServers>) {
    let mut servers = Vec::new();
    let mut dns = adapter.FirstDnsServerAddress;

    // SAFETY: Each list node is valid as long as the parent buffer is alive.
    while !dns.is_null() {
        let entry = unsafe { &*dns };

        // SAFETY: Address holds a valid SOCKET_ADDRESS within the buffer.
        if let Some(sockaddr) = unsafe { entry.Address.lpSockaddr.as_ref() } {
            if let Some((_, address)) = parse_sockaddr(sockaddr) {
                servers.push(address.to_string());
            }
        }

        dns = entry.Next;
    }

    if !servers.is_empty() {
        rows.push(RawDnsServers { index, servers });
    }
}

/// Walks the default-gateway list into route rows.
fn collect_gateways(adapter: &IP_ADAPTER_ADDRESSES_LH, index: u32, rows: &mut Vec<RawRoute>) {
    let mut gateway = adapter.FirstGatewayAddress;

    // SAFETY: Each list node is valid as long as the parent buffer is alive.
    while !gateway.is_null() {
        let entry = unsafe { &*gateway };

        // SAFETY: Address holds a valid SOCKET_ADDRESS within the buffer.
        if let Some(sockaddr) = unsafe { entry.Address.lpSockaddr.as_ref() } {
            if let Some((_, address)) = parse_sockaddr(sockaddr) {
                rows.push(RawRoute {
                    index,
                    next_hop: address.to_string(),
                });
            }
        }

        gateway = entry.Next;
    }
}

/// Reads an IPv4 or IPv6 address out of a socket address.
///
/// The pointer casts to `SOCKADDR_IN` and `SOCKADDR_IN6` are allowed despite
/// alignment lints because Windows guarantees proper alignment of these
/// structures when returned from the networking APIs.
#[allow(clippy::cast_ptr_alignment)]
fn parse_sockaddr(sockaddr: &SOCKADDR) -> Option<(AddressFamily, IpAddr)> {
    match sockaddr.sa_family {
        f if f == AF_INET => {
            // SAFETY: The family is AF_INET, so this is a SOCKADDR_IN.
            let sockaddr_in = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
            // SAFETY: sin_addr holds the IPv4 address bytes in network order.
            let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
            let address = Ipv4Addr::new(octets.s_b1, octets.s_b2, octets.s_b3, octets.s_b4);
            Some((AddressFamily::V4, IpAddr::V4(address)))
        }
        f if f == AF_INET6 => {
            // SAFETY: The family is AF_INET6, so this is a SOCKADDR_IN6.
            let sockaddr_in6 = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
            // SAFETY: The family check makes the union's Byte field valid.
            let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
            Some((AddressFamily::V6, IpAddr::V6(Ipv6Addr::from(octets))))
        }
        // Windows only returns AF_INET or AF_INET6 here; skip anything else.
        _ => None,
    }
}
