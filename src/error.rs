use std::{io, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("port `{0}` is invalid")]
    InvalidPort(String),
    #[error("port range `{0}` is invalid (start must not exceed end)")]
    InvalidPortRange(String),
    #[error("port list doesn't contain any port")]
    EmptyPortList,
    #[error("address `{0}` is invalid")]
    InvalidAddress(String),
    #[error("network `{0}` is invalid: {1}")]
    InvalidNetwork(String, #[source] ipnet::AddrParseError),
    #[error("range `{0}` mixes IPv4 and IPv6 endpoints")]
    MixedAddressFamilies(String),
    #[error("range `{0}` expands to {1} addresses, which is too many")]
    RangeTooLarge(String, u128),
    #[error("concurrency must be at least 1 (got {0})")]
    InvalidConcurrency(usize),
    #[error("probe timeout must be greater than zero (got {0:?})")]
    InvalidTimeout(Duration),
    #[error("failed to check target kind (ensure it's a domain or an IP address)")]
    HostParseFailed(#[source] url::ParseError),
    #[error("failed to resolve the given target: {0}")]
    ResolverFailed(#[source] io::Error),
    #[error("resolver didn't find any address mapped by `{0}`")]
    DomainLookupFailed(String),
    #[error("failed to build worker pool: {0}")]
    PoolBuildFailed(#[source] rayon::ThreadPoolBuildError),
}
