//! Expansion of address specs (`10.0.0.0/30`, `10.0.0.1-10.0.0.9`,
//! `10.0.0.5`) into the hosts to probe.
use std::{
    net::{IpAddr, Ipv6Addr},
    str::FromStr,
};

use ipnet::{IpNet, Ipv4AddrRange, Ipv6AddrRange};

use crate::error::ScanError;

/// Upper bound on the number of addresses a single spec may expand to.
pub const MAX_EXPANSION: u128 = 1 << 20;

fn check_size(spec: &str, count: u128) -> Result<(), ScanError> {
    if count > MAX_EXPANSION {
        return Err(ScanError::RangeTooLarge(spec.into(), count));
    }

    Ok(())
}

fn parse_addr(raw: &str) -> Result<IpAddr, ScanError> {
    let raw = raw.trim();
    IpAddr::from_str(raw).map_err(|_| ScanError::InvalidAddress(raw.into()))
}

/// Usable host addresses of a CIDR block. For IPv4 the network and
/// broadcast addresses are left out, except in /31 and /32 blocks. For
/// IPv6 the Subnet-Router anycast (network) address is left out, except
/// in /127 and /128 blocks.
pub fn expand_cidr(cidr: &str) -> Result<Vec<IpAddr>, ScanError> {
    let cidr = cidr.trim();
    let net = IpNet::from_str(cidr).map_err(|e| ScanError::InvalidNetwork(cidr.into(), e))?;

    let host_bits = u32::from(net.max_prefix_len() - net.prefix_len());
    check_size(cidr, 1u128.checked_shl(host_bits).unwrap_or(u128::MAX))?;

    let hosts: Vec<IpAddr> = match net {
        IpNet::V4(v4) => v4.hosts().map(IpAddr::V4).collect(),
        IpNet::V6(v6) => {
            let mut first = u128::from(v6.network());
            if v6.prefix_len() < 127 {
                first += 1;
            }
            Ipv6AddrRange::new(Ipv6Addr::from(first), v6.broadcast())
                .map(IpAddr::V6)
                .collect()
        }
    };

    log::debug!("Network `{}` holds {} hosts", net, hosts.len());

    Ok(hosts)
}

/// Inclusive `start-end` range, or a single address. Endpoints given in
/// descending order are swapped.
pub fn expand_range(spec: &str) -> Result<Vec<IpAddr>, ScanError> {
    let Some((start, end)) = spec.split_once('-') else {
        return Ok(vec![parse_addr(spec)?]);
    };

    let (mut start, mut end) = (parse_addr(start)?, parse_addr(end)?);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let hosts: Vec<IpAddr> = match (start, end) {
        (IpAddr::V4(start), IpAddr::V4(end)) => {
            check_size(spec, u128::from(u32::from(end) - u32::from(start)) + 1)?;
            Ipv4AddrRange::new(start, end).map(IpAddr::V4).collect()
        }
        (IpAddr::V6(start), IpAddr::V6(end)) => {
            let span = u128::from(end) - u128::from(start);
            check_size(spec, span.saturating_add(1))?;
            Ipv6AddrRange::new(start, end).map(IpAddr::V6).collect()
        }
        _ => return Err(ScanError::MixedAddressFamilies(spec.trim().into())),
    };

    log::debug!("Range `{}` holds {} hosts", spec.trim(), hosts.len());

    Ok(hosts)
}

/// Picks the right expansion for `spec`.
pub fn expand(spec: &str) -> Result<Vec<IpAddr>, ScanError> {
    if spec.contains('/') {
        expand_cidr(spec)
    } else {
        expand_range(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ips: Vec<IpAddr>) -> Vec<String> {
        ips.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn range_is_inclusive() {
        let hosts = expand_range("192.168.1.1-192.168.1.3").unwrap();
        assert_eq!(
            strings(hosts),
            vec!["192.168.1.1", "192.168.1.2", "192.168.1.3"]
        );
    }

    #[test]
    fn single_address() {
        assert_eq!(strings(expand_range("10.0.0.5").unwrap()), vec!["10.0.0.5"]);
        assert_eq!(strings(expand(" 10.0.0.5 ").unwrap()), vec!["10.0.0.5"]);
    }

    #[test]
    fn swapped_endpoints_match_ascending() {
        assert_eq!(
            expand_range("192.168.1.3-192.168.1.1").unwrap(),
            expand_range("192.168.1.1-192.168.1.3").unwrap()
        );
    }

    #[test]
    fn range_crosses_octet_boundary() {
        let hosts = expand_range("10.0.0.254 - 10.0.1.1").unwrap();
        assert_eq!(
            strings(hosts),
            vec!["10.0.0.254", "10.0.0.255", "10.0.1.0", "10.0.1.1"]
        );
    }

    #[test]
    fn ipv6_range() {
        let hosts = expand("fe80::1-fe80::3").unwrap();
        assert_eq!(strings(hosts), vec!["fe80::1", "fe80::2", "fe80::3"]);
    }

    #[test]
    fn cidr_skips_network_and_broadcast() {
        let hosts = expand_cidr("192.168.0.0/30").unwrap();
        assert_eq!(strings(hosts), vec!["192.168.0.1", "192.168.0.2"]);
    }

    #[test]
    fn cidr_host_bits_are_ignored() {
        assert_eq!(
            expand("192.168.0.77/30").unwrap(),
            expand("192.168.0.76/30").unwrap()
        );
    }

    #[test]
    fn single_host_cidr() {
        assert_eq!(strings(expand("10.1.2.3/32").unwrap()), vec!["10.1.2.3"]);
    }

    #[test]
    fn full_class_c() {
        let hosts = expand("10.0.0.0/24").unwrap();
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0].to_string(), "10.0.0.1");
        assert_eq!(hosts[253].to_string(), "10.0.0.254");
    }

    #[test]
    fn ipv6_cidr_skips_subnet_router_anycast() {
        assert_eq!(
            strings(expand("fd00::/126").unwrap()),
            vec!["fd00::1", "fd00::2", "fd00::3"]
        );
        assert_eq!(strings(expand("fd00::/127").unwrap()), vec!["fd00::", "fd00::1"]);
        assert_eq!(strings(expand("fd00::5/128").unwrap()), vec!["fd00::5"]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            expand("not-an-ip"),
            Err(ScanError::InvalidAddress(_))
        ));
        assert!(matches!(
            expand("10.0.0.0/33"),
            Err(ScanError::InvalidNetwork(..))
        ));
        assert!(matches!(
            expand("10.0.0.1-"),
            Err(ScanError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_mixed_families() {
        assert!(matches!(
            expand("10.0.0.1-::1"),
            Err(ScanError::MixedAddressFamilies(_))
        ));
    }

    #[test]
    fn rejects_oversized_expansions() {
        assert!(matches!(
            expand("10.0.0.0/8"),
            Err(ScanError::RangeTooLarge(_, _))
        ));
        assert!(matches!(
            expand("::/0"),
            Err(ScanError::RangeTooLarge(_, _))
        ));
        assert!(matches!(
            expand("::1-ffff::1"),
            Err(ScanError::RangeTooLarge(_, _))
        ));
    }
}
