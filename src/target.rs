use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    net::IpAddr,
};

/// A host probed for liveness.
///
/// Hosts are identified by the text form of their address, so they order
/// as strings do: `10.0.0.10` comes before `10.0.0.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    text: String,
    addr: IpAddr,
}

impl Host {
    #[inline]
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<IpAddr> for Host {
    fn from(addr: IpAddr) -> Self {
        Self {
            text: addr.to_string(),
            addr,
        }
    }
}

impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Host {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
