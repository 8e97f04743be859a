use std::{io, net::IpAddr, time::Duration};

use anyhow::{Context, Result};
use clap::{
    arg, crate_authors, crate_name, crate_version, value_parser, Arg, ArgAction, ArgMatches,
    Command,
};
use tcpsweep::{
    config::{self, ScanConfig},
    logger, port, range, report, scan_hosts, scan_ports,
};

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs = raw
        .parse::<f64>()
        .map_err(|_| format!("`{}` isn't a number of seconds", raw))?;

    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(format!("timeout must be greater than zero (got `{}`)", raw)),
    }
}

fn scan_args() -> [Arg; 2] {
    [
        arg!(-t --timeout <SECS> "Seconds to wait for each connection")
            .value_parser(parse_timeout),
        arg!(-w --workers <COUNT> "Maximum number of probes in flight")
            .value_parser(value_parser!(usize)),
    ]
}

fn build_config(matches: &ArgMatches, defaults: ScanConfig) -> Result<ScanConfig> {
    let timeout = matches
        .get_one::<Duration>("timeout")
        .copied()
        .unwrap_or(defaults.probe_timeout());
    let workers = matches
        .get_one::<usize>("workers")
        .copied()
        .unwrap_or(defaults.max_concurrency());

    Ok(ScanConfig::new(timeout, workers)?)
}

fn run_hosts(matches: &ArgMatches) -> Result<()> {
    let mut hosts: Vec<IpAddr> = Vec::new();
    for spec in matches.get_many::<String>("range").into_iter().flatten() {
        hosts.extend(range::expand(spec)?);
    }

    let port = matches
        .get_one::<u16>("port")
        .copied()
        .unwrap_or(config::DEFAULT_PROBE_PORT);
    let config = build_config(matches, ScanConfig::for_hosts())?;

    println!(
        "Scanning {} hosts on port {} with {} workers...",
        hosts.len(),
        port,
        config.max_concurrency()
    );

    let results = scan_hosts(hosts, port, &config)?;

    report::write_hosts(&mut io::stdout().lock(), &results).context("failed to print report")
}

fn run_ports(matches: &ArgMatches) -> Result<()> {
    let host = matches
        .get_one::<String>("host")
        .context("missing target host")?;
    let ports = port::parse_ports(
        matches
            .get_one::<String>("ports")
            .map_or(config::DEFAULT_PORTS, String::as_str),
    )?;
    let config = build_config(matches, ScanConfig::for_ports())?;

    println!(
        "Scanning {} on {} ports with {} workers...",
        host,
        ports.len(),
        config.max_concurrency()
    );

    let results = scan_ports(host, ports, &config)?;

    report::write_ports(&mut io::stdout().lock(), &results).context("failed to print report")
}

fn main() -> Result<()> {
    let arg_matches = Command::new(crate_name!())
        .about(
            "Reachability scanner based on plain TCP connections.\n\
            Doesn't need raw sockets nor elevated privileges.",
        )
        .version(crate_version!())
        .author(crate_authors!())
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            arg!(-d --debug "Turns on debugging information (repeat for per-probe output)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("hosts")
                .about("Finds live hosts (defaults: port 80, 0.6s timeout, 100 workers)")
                .arg(
                    Arg::new("range")
                        .help("CIDR blocks, start-end ranges or single addresses")
                        .required(true)
                        .num_args(1..),
                )
                .arg(
                    arg!(-P --port <PORT> "Port used to check if a host is up")
                        .value_parser(value_parser!(u16).range(1..)),
                )
                .args(scan_args()),
        )
        .subcommand(
            Command::new("ports")
                .about("Finds open ports (defaults: ports 1-1024, 1s timeout, 100 workers)")
                .arg(arg!(<host> "Address or hostname to scan"))
                .arg(arg!(-p --ports <SPEC> "Ports and ranges separated by commas, e.g. 22,80,1000-2000"))
                .args(scan_args()),
        )
        .get_matches();

    // Set debug if desired.
    logger::init(logger::level_from_occurrences(arg_matches.get_count("debug")));

    match arg_matches.subcommand() {
        Some(("hosts", matches)) => run_hosts(matches),
        Some(("ports", matches)) => run_ports(matches),
        _ => unreachable!("a subcommand is required"),
    }
}
