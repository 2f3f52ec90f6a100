// Active, non-loopback interface addresses

use std::net::IpAddr;

use crate::models::NetworkAddress;
use crate::sources::{AddressRecord, InterfaceSource, RawInterface};

/// Walks the interface table and keeps reportable addresses. Never fails: an
/// enumeration failure yields an empty list, a per-interface failure drops that interface.
pub fn active_addresses(source: &dyn InterfaceSource) -> Vec<NetworkAddress> {
    let interfaces = match source.interfaces() {
        Ok(list) => list,
        Err(e) => {
            tracing::debug!(
                error = %e,
                operation = "interfaces",
                "interface enumeration failed; reporting no addresses"
            );
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for iface in interfaces.iter().filter(|i| is_active(i)) {
        match source.addresses(iface) {
            Ok(records) => out.extend(select_addresses(&iface.name, &records)),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    operation = "interface_addresses",
                    interface = %iface.name,
                    "skipping interface"
                );
            }
        }
    }
    out
}

fn is_active(iface: &RawInterface) -> bool {
    iface.flags.up && !iface.flags.loopback
}

/// IPv4 wins: when any usable IPv4 address exists, IPv6 entries of the same interface are
/// not reported. Order follows the records.
pub fn select_addresses(interface: &str, records: &[AddressRecord]) -> Vec<NetworkAddress> {
    let usable: Vec<IpAddr> = records.iter().filter_map(usable_ip).collect();
    let has_ipv4 = usable.iter().any(IpAddr::is_ipv4);
    usable
        .into_iter()
        .filter(|ip| !has_ipv4 || ip.is_ipv4())
        .map(|ip| NetworkAddress {
            interface_name: interface.to_string(),
            ip_address: ip.to_string(),
        })
        .collect()
}

/// Resolved, non-loopback address; IPv4-mapped IPv6 is unwrapped to IPv4.
fn usable_ip(record: &AddressRecord) -> Option<IpAddr> {
    let AddressRecord::Resolved(ip) = record else {
        return None;
    };
    let ip = match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(*ip, IpAddr::V4),
        IpAddr::V4(_) => *ip,
    };
    (!ip.is_loopback()).then_some(ip)
}
