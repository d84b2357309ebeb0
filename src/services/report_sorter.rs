//! Orders host entries by network address.

use std::net::IpAddr;
use tracing::debug;

use crate::domain::models::{HostReport, Report};

/// Comparison key for a host identifier.
///
/// IPv4 addresses are widened to their IPv4-mapped IPv6 form so both families
/// share one 16-byte key space. Identifiers that do not parse yield `None`,
/// which orders before every address.
pub fn address_key(host: &str) -> Option<[u8; 16]> {
    match host.parse::<IpAddr>().ok()? {
        IpAddr::V4(v4) => Some(v4.to_ipv6_mapped().octets()),
        IpAddr::V6(v6) => Some(v6.octets()),
    }
}

/// Build the final report from unordered host entries.
///
/// Hosts are ordered by [`address_key`], falling back to the identifier text
/// for equal keys. Keys are computed once per host.
pub fn sort_hosts(hosts: Vec<HostReport>) -> Report {
    let mut keyed: Vec<(Option<[u8; 16]>, HostReport)> = hosts
        .into_iter()
        .map(|host| (address_key(&host.host), host))
        .collect();

    for (_, host) in keyed.iter().filter(|(key, _)| key.is_none()) {
        debug!(host = %host.host, "host identifier is not an IP address, ordering it first");
    }

    keyed.sort_unstable_by(|(ka, a), (kb, b)| (ka, &a.host).cmp(&(kb, &b.host)));

    Report::from_sorted(keyed.into_iter().map(|(_, host)| host).collect())
}
