use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use url::Host;

use crate::error::ScanError;

/// Resolves `target` to a single address. Literal addresses (IPv6 with or
/// without brackets) are returned as is, domains go through the system
/// resolver, preferring an IPv4 answer.
pub fn lookup(target: &str) -> Result<IpAddr, ScanError> {
    let target = target.trim();
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }

    let ip = match Host::parse(target).map_err(ScanError::HostParseFailed)? {
        Host::Domain(dmn) => {
            let addrs: Vec<SocketAddr> = (dmn.as_str(), 0 /* dummy port */)
                .to_socket_addrs()
                .map_err(ScanError::ResolverFailed)?
                .collect();

            addrs
                .iter()
                .find(|saddr| saddr.is_ipv4())
                .or_else(|| addrs.first())
                .map(SocketAddr::ip)
                .ok_or(ScanError::DomainLookupFailed(target.into()))?
        }
        Host::Ipv4(ip) => IpAddr::V4(ip),
        Host::Ipv6(ip) => IpAddr::V6(ip),
    };

    log::debug!("Target `{}` resolved to `{}`", target, ip);

    Ok(ip)
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;

    #[test]
    fn literal_ipv4() {
        assert_eq!(
            lookup("127.0.0.1").unwrap(),
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        );
    }

    #[test]
    fn literal_ipv6_with_and_without_brackets() {
        assert_eq!(lookup("::1").unwrap(), IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(lookup("[::1]").unwrap(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        assert!(lookup("localhost").unwrap().is_loopback());
    }

    #[test]
    fn malformed_host_is_rejected() {
        assert!(matches!(
            lookup("exa mple.com"),
            Err(ScanError::HostParseFailed(_))
        ));
    }
}
