use std::{
    net::IpAddr,
    panic::{self, AssertUnwindSafe},
    slice,
    sync::mpsc,
    time::{Duration, Instant},
};

use rayon::ThreadPoolBuilder;

use crate::{
    config::ScanConfig,
    error::ScanError,
    probe::{HostProbe, PortProbe, Prober},
    resolver,
    target::Host,
};

/// Outcome of probing one target.
///
/// Ordering compares the target first, so sorting a list of results sorts
/// it by target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbeResult<T> {
    pub target: T,
    pub reachable: bool,
}

impl<T> ProbeResult<T> {
    #[inline]
    fn new(target: T, reachable: bool) -> Self {
        Self { target, reachable }
    }
}

/// Every result of a scan, sorted by target, one per submitted target.
#[derive(Debug, Clone)]
pub struct ResultSet<T> {
    elapsed: Duration,
    results: Vec<ProbeResult<T>>,
}

impl<T> ResultSet<T> {
    #[inline]
    fn new(elapsed: Duration, results: Vec<ProbeResult<T>>) -> Self {
        Self { elapsed, results }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn iter(&self) -> slice::Iter<'_, ProbeResult<T>> {
        self.results.iter()
    }

    /// Targets that accepted a connection, in result order.
    pub fn reachable(&self) -> impl Iterator<Item = &T> {
        self.results
            .iter()
            .filter(|r| r.reachable)
            .map(|r| &r.target)
    }

    pub fn into_vec(self) -> Vec<ProbeResult<T>> {
        self.results
    }
}

impl<'a, T> IntoIterator for &'a ResultSet<T> {
    type Item = &'a ProbeResult<T>;
    type IntoIter = slice::Iter<'a, ProbeResult<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Never more threads than targets, idle workers are pointless.
#[inline]
fn pool_size(workers: usize, targets: usize) -> usize {
    workers.min(targets)
}

// A panicking probe counts as unreachable and doesn't take its siblings down.
fn probe_guarded<T, P>(prober: &P, target: &T, timeout: Duration) -> bool
where
    P: Prober<T> + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| prober.probe(target, timeout))).unwrap_or_else(|_| {
        log::debug!("Probe panicked, target marked as unreachable");
        false
    })
}

/// Probes every target exactly once, with at most
/// `config.max_concurrency()` probes in flight.
///
/// The worker pool lives only for the duration of this call. Results are
/// gathered as workers finish and sorted afterwards, so the completion
/// order never leaks into the output. Duplicated targets are probed and
/// reported once per occurrence.
pub fn scan<T, P>(
    targets: impl IntoIterator<Item = T>,
    config: &ScanConfig,
    prober: &P,
) -> Result<ResultSet<T>, ScanError>
where
    T: Ord + Send,
    P: Prober<T> + ?Sized,
{
    let targets: Vec<T> = targets.into_iter().collect();
    if targets.is_empty() {
        log::debug!("No targets to probe");
        return Ok(ResultSet::new(Duration::ZERO, Vec::new()));
    }

    let timeout = config.probe_timeout();
    let total = targets.len();
    let workers = pool_size(config.max_concurrency(), total);

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("probe-{}", i))
        .build()
        .map_err(ScanError::PoolBuildFailed)?;

    log::debug!(
        "Probing {} targets with {} workers and a {:?} timeout",
        total,
        workers,
        timeout
    );

    let (tx, rx) = mpsc::channel();

    let now = Instant::now();
    pool.scope(move |s| {
        for target in targets {
            let tx = tx.clone();
            s.spawn(move |_| {
                let reachable = probe_guarded(prober, &target, timeout);
                // The receiver outlives the scope.
                let _ = tx.send(ProbeResult::new(target, reachable));
            });
        }
    });
    let elapsed = now.elapsed();

    // Every sender is gone once the scope has joined.
    let mut results: Vec<_> = rx.into_iter().collect();
    debug_assert_eq!(results.len(), total);
    results.sort_unstable();

    log::debug!("Collected {} results in {:?}", results.len(), elapsed);

    Ok(ResultSet::new(elapsed, results))
}

/// Host liveness: which of `hosts` accept a connection on `port`.
///
/// Results are ordered by the text form of each address.
pub fn scan_hosts(
    hosts: impl IntoIterator<Item = IpAddr>,
    port: u16,
    config: &ScanConfig,
) -> Result<ResultSet<Host>, ScanError> {
    scan(hosts.into_iter().map(Host::from), config, &HostProbe::new(port))
}

/// Port openness on `host`, which may be an address or a domain.
///
/// A host that can't be resolved yields a closed result for every port,
/// while a malformed one is rejected before probing.
pub fn scan_ports(
    host: &str,
    ports: impl IntoIterator<Item = u16>,
    config: &ScanConfig,
) -> Result<ResultSet<u16>, ScanError> {
    let prober = match resolver::lookup(host) {
        Ok(ip) => PortProbe::new(ip),
        Err(e @ (ScanError::ResolverFailed(_) | ScanError::DomainLookupFailed(_))) => {
            log::debug!("Couldn't resolve `{}`, no port will connect: {}", host, e);
            PortProbe::unresolved()
        }
        Err(e) => return Err(e),
    };

    scan(ports, config, &prober)
}
