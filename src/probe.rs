use std::{
    net::{IpAddr, SocketAddr, TcpStream},
    time::Duration,
};

use crate::target::Host;

/// Decides whether a single target is reachable.
///
/// Implementations must fold every failure into `false` and must return
/// within roughly `timeout`.
pub trait Prober<T>: Sync {
    fn probe(&self, target: &T, timeout: Duration) -> bool;
}

impl<T, F> Prober<T> for F
where
    F: Fn(&T, Duration) -> bool + Sync,
{
    fn probe(&self, target: &T, timeout: Duration) -> bool {
        self(target, timeout)
    }
}

/// Attempts one TCP handshake against `addr`.
///
/// The stream, if any, is dropped before returning, so the socket is
/// closed on every path.
pub fn connect(addr: SocketAddr, timeout: Duration) -> bool {
    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_stream) => {
            log::trace!("Connected to `{}`", addr);
            true
        }
        Err(e) => {
            log::trace!("Connection to `{}` failed: {}", addr, e);
            false
        }
    }
}

/// Host liveness: a host is up when `port` accepts a connection.
#[derive(Debug, Clone, Copy)]
pub struct HostProbe {
    port: u16,
}

impl HostProbe {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl Prober<Host> for HostProbe {
    fn probe(&self, target: &Host, timeout: Duration) -> bool {
        connect(SocketAddr::new(target.addr(), self.port), timeout)
    }
}

/// Port openness on a fixed host.
#[derive(Debug, Clone, Copy)]
pub struct PortProbe {
    // `None` when the host name couldn't be resolved.
    host: Option<IpAddr>,
}

impl PortProbe {
    pub fn new(host: IpAddr) -> Self {
        Self { host: Some(host) }
    }

    pub fn unresolved() -> Self {
        Self { host: None }
    }
}

impl Prober<u16> for PortProbe {
    fn probe(&self, target: &u16, timeout: Duration) -> bool {
        self.host
            .map_or(false, |ip| connect(SocketAddr::new(ip, *target), timeout))
    }
}
