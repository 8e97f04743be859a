use std::{num::NonZeroUsize, time::Duration};

use crate::error::ScanError;

pub const DEFAULT_PROBE_PORT: u16 = 80;
pub const DEFAULT_HOST_TIMEOUT: Duration = Duration::from_millis(600);
pub const DEFAULT_PORT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_HOST_WORKERS: usize = 100;
pub const DEFAULT_PORT_WORKERS: usize = 100;
pub const DEFAULT_PORTS: &str = "1-1024";

/// Settings of a single scan. Built once and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    probe_timeout: Duration,
    max_concurrency: NonZeroUsize,
}

impl ScanConfig {
    pub fn new(probe_timeout: Duration, max_concurrency: usize) -> Result<Self, ScanError> {
        if probe_timeout.is_zero() {
            return Err(ScanError::InvalidTimeout(probe_timeout));
        }

        let max_concurrency =
            NonZeroUsize::new(max_concurrency).ok_or(ScanError::InvalidConcurrency(0))?;

        Ok(Self {
            probe_timeout,
            max_concurrency,
        })
    }

    pub fn for_hosts() -> Self {
        Self::with_defaults(DEFAULT_HOST_TIMEOUT, DEFAULT_HOST_WORKERS)
    }

    pub fn for_ports() -> Self {
        Self::with_defaults(DEFAULT_PORT_TIMEOUT, DEFAULT_PORT_WORKERS)
    }

    fn with_defaults(probe_timeout: Duration, workers: usize) -> Self {
        Self {
            probe_timeout,
            max_concurrency: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }

    #[inline]
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    #[inline]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_concurrency() {
        let err = ScanConfig::new(Duration::from_millis(100), 0).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConcurrency(0)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ScanConfig::new(Duration::ZERO, 4).unwrap_err();
        assert!(matches!(err, ScanError::InvalidTimeout(_)));
    }

    #[test]
    fn keeps_given_values() {
        let config = ScanConfig::new(Duration::from_millis(250), 8).unwrap();
        assert_eq!(config.probe_timeout(), Duration::from_millis(250));
        assert_eq!(config.max_concurrency(), 8);
    }

    #[test]
    fn defaults_match_the_cli() {
        assert_eq!(ScanConfig::for_hosts().probe_timeout(), DEFAULT_HOST_TIMEOUT);
        assert_eq!(ScanConfig::for_hosts().max_concurrency(), DEFAULT_HOST_WORKERS);
        assert_eq!(ScanConfig::for_ports().probe_timeout(), DEFAULT_PORT_TIMEOUT);
        assert_eq!(ScanConfig::for_ports().max_concurrency(), DEFAULT_PORT_WORKERS);
    }
}
