pub mod config;
pub mod error;
pub mod logger;
pub mod port;
pub mod probe;
pub mod range;
pub mod report;
pub mod resolver;
pub mod scan;
pub mod target;

pub use config::ScanConfig;
pub use error::ScanError;
pub use probe::Prober;
pub use scan::{scan, scan_hosts, scan_ports, ProbeResult, ResultSet};
pub use target::Host;
